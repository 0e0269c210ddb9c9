//! Property-based checks of the universal invariants (spec §8).

use dpf::eval::{eval_interval, eval_point, eval_point_memoized, eval_sequence_breadth_first, eval_sequence_recipe};
use dpf::input::EffectiveBits;
use dpf::key::gen;
use dpf::memo::PathMemoizer;
use dpf::output::{Int32, LeafArithmetic};
use dpf::prg::FixedKeyAesPrg;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn gen_pair(seed: u64, domain_bits: u32, x_star: u64, y: u32) -> (dpf::Key<Int32>, dpf::Key<Int32>) {
    let prg = FixedKeyAesPrg::new();
    let mut rng = StdRng::seed_from_u64(seed);
    gen::<_, Int32>(&prg, domain_bits, Some(x_star), Some(Int32(y)), &mut rng).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Invariant 1: correctness. Combining both keys' point evaluations
    /// recovers `y` at `x*` and the output group's zero everywhere else.
    #[test]
    fn correctness_point_eval(
        seed in any::<u64>(),
        domain_bits in 4u32..12,
        y in any::<u32>(),
        offset in 0u64..4096,
    ) {
        let domain_size = 1u64 << domain_bits;
        let x_star = offset % domain_size;
        let x = (offset.wrapping_add(1)) % domain_size;
        let (k0, k1) = gen_pair(seed, domain_bits, x_star, y);
        let prg = FixedKeyAesPrg::new();

        let at_star = eval_point(&prg, &k0, &x_star).unwrap().combine(&eval_point(&prg, &k1, &x_star).unwrap());
        prop_assert_eq!(at_star, Int32(y));

        if x != x_star {
            let at_other = eval_point(&prg, &k0, &x).unwrap().combine(&eval_point(&prg, &k1, &x).unwrap());
            prop_assert_eq!(at_other, Int32::zero());
        }
    }

    /// Invariant 2: key-pair consistency.
    #[test]
    fn key_pair_consistency(seed in any::<u64>(), domain_bits in 4u32..12, x_star in 0u64..16, y in any::<u32>()) {
        let x_star = x_star % (1u64 << domain_bits);
        let (k0, k1) = gen_pair(seed, domain_bits, x_star, y);
        prop_assert_eq!(k0.correction_words(), k1.correction_words());
        prop_assert_eq!(k0.advice(), k1.advice());
        prop_assert_ne!(k0.root().control_bit(), k1.root().control_bit());
    }

    /// Invariant 3: equivalence across engines.
    #[test]
    fn engines_agree(seed in any::<u64>(), domain_bits in 4u32..10, x_star in 0u64..16, y in any::<u32>()) {
        let domain_size = 1u64 << domain_bits;
        let x_star = x_star % domain_size;
        let (k0, k1) = gen_pair(seed, domain_bits, x_star, y);
        let prg = FixedKeyAesPrg::new();

        let xs: Vec<u64> = (0..domain_size).collect();
        let point_vals: Vec<Int32> = xs
            .iter()
            .map(|&x| eval_point(&prg, &k0, &x).unwrap().combine(&eval_point(&prg, &k1, &x).unwrap()))
            .collect();
        let interval_vals: Vec<Int32> = eval_interval(&prg, &k0, 0, domain_size - 1)
            .unwrap()
            .into_iter()
            .zip(eval_interval(&prg, &k1, 0, domain_size - 1).unwrap())
            .map(|(a, b)| a.combine(&b))
            .collect();
        let recipe_vals: Vec<Int32> = eval_sequence_recipe(&prg, &k0, &xs)
            .unwrap()
            .into_iter()
            .zip(eval_sequence_recipe(&prg, &k1, &xs).unwrap())
            .map(|(a, b)| a.combine(&b))
            .collect();
        let bfs_vals: Vec<Int32> = eval_sequence_breadth_first(&prg, &k0, &xs)
            .unwrap()
            .into_iter()
            .zip(eval_sequence_breadth_first(&prg, &k1, &xs).unwrap())
            .map(|(a, b)| a.combine(&b))
            .collect();

        prop_assert_eq!(&point_vals, &interval_vals);
        prop_assert_eq!(&point_vals, &recipe_vals);
        prop_assert_eq!(&point_vals, &bfs_vals);
    }

    /// Invariant 4: memoizer equivalence (path memoizer vs. the stateless engine).
    #[test]
    fn path_memoizer_matches_stateless(seed in any::<u64>(), domain_bits in 4u32..10, x_star in 0u64..16, y in any::<u32>(), queries in prop::collection::vec(0u64..4096, 1..20)) {
        let domain_size = 1u64 << domain_bits;
        let x_star = x_star % domain_size;
        let (k0, _k1) = gen_pair(seed, domain_bits, x_star, y);
        let prg = FixedKeyAesPrg::new();
        let mut memo = PathMemoizer::<EffectiveBits>::new(k0.depth());

        for &q in &queries {
            let x = q % domain_size;
            let stateless = eval_point(&prg, &k0, &x).unwrap();
            let memoized = eval_point_memoized(&prg, &k0, &x, &mut memo).unwrap();
            prop_assert_eq!(stateless, memoized);
        }
    }

    /// Invariant 5: recipe soundness.
    #[test]
    fn recipe_soundness(xs in prop::collection::vec(0u64..1024, 0..64)) {
        let mut sorted = xs.clone();
        sorted.sort_unstable();
        let recipe = dpf::memo::Recipe::build(&sorted, 10, 1);
        prop_assert_eq!(recipe.output_indices().len(), sorted.len());
        prop_assert!(recipe.output_indices().windows(2).all(|w| w[0] <= w[1]));
        let bound = recipe.num_leaf_nodes() as u64;
        prop_assert!(recipe.output_indices().iter().all(|&i| i < bound));
    }
}
