use graph_walk_core::{
    find_cycles, hop_distances, run_algorithm, shortest_path_unweighted, shortest_path_weighted,
    Algorithm, Distance, Graph, Outcome, Vertex, VertexId,
};

/// Deterministic LCG so every run sees the same graphs.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
}

fn random_graph(seed: u64, directed: bool, n: usize, m: usize) -> (Graph, Vec<VertexId>) {
    let mut rng = Lcg(seed);
    let mut g = Graph::new(directed);
    let ids: Vec<_> = (0..n)
        .map(|i| g.add_vertex(Vertex::new(format!("n{i}"), 0.0, 0.0)).unwrap())
        .collect();
    for _ in 0..m {
        let a = rng.next(n as u64) as usize;
        let b = rng.next(n as u64) as usize;
        let w = rng.next(10) as f64;
        g.add_edge(ids[a], ids[b], w).unwrap();
    }
    (g, ids)
}

fn labelled(directed: bool, labels: &[&str]) -> (Graph, Vec<VertexId>) {
    let mut g = Graph::new(directed);
    let ids = labels
        .iter()
        .map(|l| g.add_vertex(Vertex::new(*l, 0.0, 0.0)).unwrap())
        .collect();
    (g, ids)
}

#[test]
fn bfs_paths_are_connected_and_match_distance() {
    for seed in 1..=12 {
        let directed = seed % 2 == 0;
        let (g, ids) = random_graph(seed, directed, 15, 20);
        let start = ids[0];
        let dists = hop_distances(&g, start).unwrap();

        for (end, dist) in dists {
            let path = shortest_path_unweighted(&g, start, end).unwrap();
            match (path, dist) {
                (Some(p), Some(d)) => {
                    assert_eq!(p.vertices.first(), Some(&start));
                    assert_eq!(p.vertices.last(), Some(&end));
                    assert!(p
                        .vertices
                        .windows(2)
                        .all(|w| g.find_edge(w[0], w[1]).is_some()));
                    assert_eq!(p.distance, Distance::Hops(d));
                    assert_eq!(p.hops(), d as usize);
                }
                (None, None) => {}
                (p, d) => panic!("path {p:?} disagrees with distance {d:?} (seed {seed})"),
            }
        }
    }
}

#[test]
fn unreachable_pairs_have_no_path_in_both_engines() {
    for seed in 1..=12 {
        let (g, ids) = random_graph(seed, true, 12, 8);
        for &end in &ids {
            let bfs = shortest_path_unweighted(&g, ids[0], end).unwrap();
            let dijkstra = shortest_path_weighted(&g, ids[0], end).unwrap();
            assert_eq!(bfs.is_none(), dijkstra.is_none(), "seed {seed}");
        }
    }
}

#[test]
fn find_cycles_is_idempotent() {
    for seed in 1..=8 {
        let (g, _) = random_graph(seed, seed % 2 == 1, 10, 18);
        assert_eq!(find_cycles(&g).unwrap(), find_cycles(&g).unwrap());
    }
}

#[test]
fn directed_triangle_has_exactly_one_cycle() {
    let (mut g, ids) = labelled(true, &["A", "B", "C"]);
    g.add_edge(ids[0], ids[1], 1.0).unwrap();
    g.add_edge(ids[1], ids[2], 1.0).unwrap();
    g.add_edge(ids[2], ids[0], 1.0).unwrap();

    let out = run_algorithm(&g, Algorithm::Dfs, None, None).unwrap();
    let cycles = out.cycles();
    assert_eq!(cycles.len(), 1);
    let mut found = cycles[0].clone();
    found.sort();
    assert_eq!(found, ids);
}

#[test]
fn undirected_triangle_reports_only_the_triangle() {
    let (mut g, ids) = labelled(false, &["A", "B", "C"]);
    g.add_edge(ids[0], ids[1], 1.0).unwrap();
    g.add_edge(ids[1], ids[2], 1.0).unwrap();
    g.add_edge(ids[2], ids[0], 1.0).unwrap();

    let cycles = find_cycles(&g).unwrap();
    assert!(cycles.iter().all(|c| c.len() >= 3));
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].len(), 3);
}

#[test]
fn dijkstra_prefers_lighter_route() {
    let (mut g, ids) = labelled(true, &["A", "B", "C", "D"]);
    let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);
    g.add_edge(a, b, 4.0).unwrap();
    g.add_edge(a, c, 1.0).unwrap();
    g.add_edge(c, b, 1.0).unwrap();
    g.add_edge(b, d, 1.0).unwrap();

    let out = g.run_algorithm("Dijkstra", Some(a), Some(d)).unwrap();
    match out {
        Outcome::Path(p) => {
            assert_eq!(p.vertices, vec![a, c, b, d]);
            assert_eq!(p.distance, Distance::Weight(3.0));
        }
        other => panic!("expected a path, got {other:?}"),
    }
}

#[test]
fn removed_vertex_leaves_no_edges_behind() {
    let (mut g, ids) = random_graph(99, false, 8, 16);
    let victim = ids[3];
    g.remove_vertex(victim).unwrap();

    assert!(g.edges().all(|(_, e)| e.from != victim && e.to != victim));
    for &other in ids.iter().filter(|&&v| v != victim) {
        for edge in g.connected_edges(other) {
            assert!(!g.edge(edge).unwrap().touches(victim));
        }
    }
}

#[test]
fn undirected_weight_change_is_mirrored() {
    let (mut g, ids) = labelled(false, &["U", "V"]);
    let uv = g.add_edge(ids[0], ids[1], 1.0).unwrap();
    g.set_weight(uv, 9.5).unwrap();
    let vu = g.find_edge(ids[1], ids[0]).unwrap();
    assert_eq!(g.edge(vu).unwrap().weight, 9.5);
}
