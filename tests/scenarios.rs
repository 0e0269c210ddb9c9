//! Concrete end-to-end scenarios (spec §8) exercised against the public API.

use std::sync::Arc;

use dpf::eval::{eval_full_bits, eval_interval, eval_point, eval_sequence_breadth_first, eval_sequence_recipe};
use dpf::input::{Keyword, KeywordIntMap};
use dpf::key::gen;
use dpf::output::{Bit, Int32, Int64, Int8, LeafArithmetic};
use dpf::prg::FixedKeyAesPrg;
use dpf::vernalize::{InputBindMachine, InputBindStep, OutputBindMachine, OutputBindStep};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn combine_at<T: LeafArithmetic>(k0: &dpf::Key<T>, k1: &dpf::Key<T>, x: u64) -> T {
    let prg = FixedKeyAesPrg::new();
    let y0 = eval_point(&prg, k0, &x).unwrap();
    let y1 = eval_point(&prg, k1, &x).unwrap();
    y0.combine(&y1)
}

#[test]
fn e1_point_at_target_and_off_target() {
    let prg = FixedKeyAesPrg::new();
    let mut rng = StdRng::seed_from_u64(100);
    let (k0, k1) = gen::<_, Int32>(&prg, 8, Some(42), Some(Int32(0xAAAA_AAAA)), &mut rng).unwrap();

    assert_eq!(combine_at(&k0, &k1, 42u64), Int32(0xAAAA_AAAA));
    assert_eq!(combine_at(&k0, &k1, 41u64), Int32::zero());
}

#[test]
fn e2_full_domain_single_set_bit() {
    let prg = FixedKeyAesPrg::new();
    let mut rng = StdRng::seed_from_u64(101);
    let (k0, k1) = gen::<_, Bit>(&prg, 16, Some(42), Some(Bit::ONE), &mut rng).unwrap();

    let buf0 = eval_full_bits(&prg, &k0).unwrap().into_inner();
    let buf1 = eval_full_bits(&prg, &k1).unwrap().into_inner();

    assert_eq!(buf0.len(), 1 << 16);
    for i in 0..buf0.len() {
        let combined = buf0.get(i) ^ buf1.get(i);
        assert_eq!(combined, i == 42, "mismatch at index {}", i);
    }
}

#[test]
fn e3_interval_window() {
    let prg = FixedKeyAesPrg::new();
    let mut rng = StdRng::seed_from_u64(102);
    let (k0, k1) = gen::<_, Int64>(&prg, 16, Some(42), Some(Int64(1)), &mut rng).unwrap();

    let out0 = eval_interval(&prg, &k0, 0, 49).unwrap();
    let out1 = eval_interval(&prg, &k1, 0, 49).unwrap();
    assert_eq!(out0.len(), 50);
    for i in 0..50u64 {
        let combined = out0[i as usize].combine(&out1[i as usize]);
        let expected = if i == 42 { Int64(1) } else { Int64(0) };
        assert_eq!(combined, expected, "mismatch at index {}", i);
    }

    // Index 0 sits in a leaf bucket (0/2 == 0) entirely different from x*'s
    // (42/2 == 21): a genuinely off-path bucket, not merely an off-target
    // slot sharing x*'s own bucket.
    assert_eq!(out0[0].combine(&out1[0]), Int64(0));
}

#[test]
fn e4_keyword_sequence_xor_combine() {
    let alphabet: Arc<[u8]> = (b'a'..=b'z').collect::<Vec<u8>>().into();
    let words: Vec<Keyword> = ["cat", "dog", "bat", "pig"]
        .iter()
        .map(|w| Keyword::new(alphabet.clone(), w.as_bytes()).unwrap())
        .collect();
    let map = KeywordIntMap::new(words.clone());

    let target = map.index_of(&words[2]).unwrap(); // "bat"

    let prg = FixedKeyAesPrg::new();
    let mut rng = StdRng::seed_from_u64(103);
    let (k0, k1) = gen::<_, Int32>(&prg, map.bit_length(), Some(target), Some(Int32(56)), &mut rng).unwrap();

    let xs: Vec<u64> = words.iter().map(|w| map.index_of(w).unwrap()).collect();
    let out0 = eval_sequence_recipe(&prg, &k0, &xs).unwrap();
    let out1 = eval_sequence_recipe(&prg, &k1, &xs).unwrap();

    let combined: Vec<Int32> = out0.iter().zip(out1.iter()).map(|(a, b)| a.combine(b)).collect();
    assert_eq!(combined, vec![Int32(0), Int32(0), Int32(56), Int32(0)]);
}

#[test]
fn e5_sequence_with_duplicates_matches_scalar_reference() {
    let prg = FixedKeyAesPrg::new();
    let mut rng = StdRng::seed_from_u64(104);
    let (k0, k1) = gen::<_, Bit>(&prg, 16, Some(42), Some(Bit::ONE), &mut rng).unwrap();

    let xs = vec![1u64, 42, 42, 100, 42, 9999, 0];
    let recipe_out0 = eval_sequence_recipe(&prg, &k0, &xs).unwrap();
    let recipe_out1 = eval_sequence_recipe(&prg, &k1, &xs).unwrap();
    let bfs_out0 = eval_sequence_breadth_first(&prg, &k0, &xs).unwrap();
    let bfs_out1 = eval_sequence_breadth_first(&prg, &k1, &xs).unwrap();

    for (i, &x) in xs.iter().enumerate() {
        let scalar = combine_at(&k0, &k1, x);
        assert_eq!(recipe_out0[i].combine(&recipe_out1[i]), scalar);
        assert_eq!(bfs_out0[i].combine(&bfs_out1[i]), scalar);
        let expected = if x == 42 { Bit::ONE } else { Bit::ZERO };
        assert_eq!(scalar, expected, "mismatch at x={}", x);
    }
}

#[test]
fn e6_wildcard_input_and_output_after_vernalization() {
    let prg = FixedKeyAesPrg::new();
    let mut rng = StdRng::seed_from_u64(105);
    let (mut k0, mut k1) = gen::<_, Int8>(&prg, 8, None, None, &mut rng).unwrap();
    assert!(k0.is_input_wildcard_pending());
    assert!(k0.is_output_wildcard_pending());

    // Bind the real input x* = 12, secret-shared out of band.
    let x_star = 12u64;
    let share0 = 200u64;
    let share1 = x_star ^ share0;
    let mut im0 = InputBindMachine::new(&k0, share0).unwrap();
    let mut im1 = InputBindMachine::new(&k1, share1).unwrap();
    let msg0 = match im0.next_step() {
        InputBindStep::NeedSend { message } => message,
        _ => panic!(),
    };
    im0.on_sent();
    let msg1 = match im1.next_step() {
        InputBindStep::NeedSend { message } => message,
        _ => panic!(),
    };
    im1.on_sent();
    im0.on_received(msg1);
    im1.on_received(msg0);
    let offset0 = match im0.next_step() {
        InputBindStep::Done { offset } => offset,
        _ => panic!(),
    };
    let offset1 = match im1.next_step() {
        InputBindStep::Done { offset } => offset,
        _ => panic!(),
    };
    k0.apply_bound_input_offset(offset0);
    k1.apply_bound_input_offset(offset1);

    // Bind the real output y, shared as two arbitrary shares.
    let y = Int8(77);
    let y0 = Int8(9);
    let y1 = y.combine_inverse(&y0);
    let mut om0 = OutputBindMachine::new(&k0, y0, true).unwrap();
    let mut om1 = OutputBindMachine::new(&k1, y1, false).unwrap();
    let blinded0 = match om0.next_step() {
        OutputBindStep::NeedSendBlinded { message } => message,
        _ => panic!(),
    };
    om0.on_sent();
    let blinded1 = match om1.next_step() {
        OutputBindStep::NeedSendBlinded { message } => message,
        _ => panic!(),
    };
    om1.on_sent();
    om0.on_received_blinded(blinded1);
    om1.on_received_blinded(blinded0);
    let share_msg0 = match om0.next_step() {
        OutputBindStep::NeedSendLeafShare { message } => message,
        _ => panic!(),
    };
    om0.on_sent();
    let share_msg1 = match om1.next_step() {
        OutputBindStep::NeedSendLeafShare { message } => message,
        _ => panic!(),
    };
    om1.on_sent();
    om0.on_received_leaf_share(share_msg1);
    om1.on_received_leaf_share(share_msg0);
    let (slot0, value0) = match om0.next_step() {
        OutputBindStep::Done { slot, value } => (slot, value),
        _ => panic!(),
    };
    let (slot1, value1) = match om1.next_step() {
        OutputBindStep::Done { slot, value } => (slot, value),
        _ => panic!(),
    };
    k0.apply_wildcard_output(slot0, value0);
    k1.apply_wildcard_output(slot1, value1);

    assert!(k0.is_ready());
    assert!(k1.is_ready());

    let values0 = dpf::eval::eval_full(&prg, &k0).unwrap();
    let values1 = dpf::eval::eval_full(&prg, &k1).unwrap();
    assert_eq!(values0.len(), 1 << 8);
    for i in 0..values0.len() {
        let combined = values0[i].combine(&values1[i]);
        let expected = if i as u64 == x_star { y } else { Int8::zero() };
        assert_eq!(combined, expected, "mismatch at index {}", i);
    }
}
