use proptest::prelude::*;
use u_lastmile::distance::DistanceMatrix;
use u_lastmile::ga::operators::{inversion_mutation, order_crossover, swap_mutation};
use u_lastmile::ga::{GaConfig, GaRunner};
use u_lastmile::random::create_rng;
use u_lastmile::route::{Endpoints, OpenPath, RouteSolver};

// --- STRATEGIES ---

prop_compose! {
    fn arb_permutation(max_len: usize)(n in 1..max_len)(
        perm in Just((0..n).collect::<Vec<usize>>()).prop_shuffle()
    ) -> Vec<usize> {
        perm
    }
}

prop_compose! {
    fn arb_matrix(max_n: usize)(n in 1..max_n)(
        data in proptest::collection::vec(0.0..1000.0f64, n * n),
        n in Just(n)
    ) -> DistanceMatrix {
        DistanceMatrix::from_data(n, data).expect("finite non-negative")
    }
}

prop_compose! {
    fn arb_problem()(dm in arb_matrix(9))(
        start in proptest::option::of(0..dm.size()),
        end in proptest::option::of(0..dm.size()),
        dm in Just(dm)
    ) -> (DistanceMatrix, Endpoints) {
        (dm, Endpoints::new(start, end))
    }
}

fn sorted(v: &[usize]) -> Vec<usize> {
    let mut s = v.to_vec();
    s.sort_unstable();
    s
}

fn quick_config(seed: u64) -> GaConfig {
    GaConfig::default()
        .with_pop_size(16)
        .with_generations(15)
        .with_elite_size(2)
        .with_tournament_k(3)
        .with_seed(seed)
}

proptest! {
    #[test]
    fn ox_children_are_permutations_of_parents(
        p1 in arb_permutation(30),
        seed in any::<u64>()
    ) {
        let mut rng = create_rng(seed);
        let mut p2 = p1.clone();
        p2.reverse();
        let (c1, c2) = order_crossover(&p1, &p2, &mut rng);
        prop_assert_eq!(sorted(&c1), sorted(&p1));
        prop_assert_eq!(sorted(&c2), sorted(&p1));
    }

    #[test]
    fn mutations_preserve_stop_set(
        perm in arb_permutation(30),
        rate in 0.0..=1.0f64,
        seed in any::<u64>()
    ) {
        let mut rng = create_rng(seed);
        let mut mutated = perm.clone();
        swap_mutation(&mut mutated, rate, &mut rng);
        inversion_mutation(&mut mutated, rate, &mut rng);
        prop_assert_eq!(sorted(&mutated), sorted(&perm));
    }

    #[test]
    fn solver_returns_valid_route((dm, ends) in arb_problem(), seed in any::<u64>()) {
        let n = dm.size();
        let solver = RouteSolver::new(dm.clone(), quick_config(seed)).expect("valid config");
        match solver.solve(ends) {
            Ok(solution) => {
                prop_assert_eq!(sorted(&solution.route), (0..n).collect::<Vec<_>>());
                if let Some(s) = ends.start {
                    prop_assert_eq!(solution.route[0], s);
                }
                if let Some(e) = ends.end {
                    prop_assert_eq!(solution.route[n - 1], e);
                }
                prop_assert!((solution.distance - dm.path_length(&solution.route)).abs() < 1e-9);
                prop_assert!(solution.generations_run <= 15);
            }
            Err(err) => {
                prop_assert!(err.is_validation());
                prop_assert_eq!(ends.start, ends.end);
            }
        }
    }

    #[test]
    fn best_distance_is_monotone(dm in arb_matrix(12), seed in any::<u64>()) {
        let result = GaRunner::run(&OpenPath::new(&dm), &quick_config(seed)).expect("ran");
        prop_assert!(result.fitness_history.windows(2).all(|w| w[1] <= w[0]));
        prop_assert!(result.generations <= 15);
    }
}
