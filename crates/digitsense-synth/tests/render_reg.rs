//! Synthetic rendering regression test
//!
//! Renders every catalog variant with jittered and messy styles, checks
//! output shape and range, and checks that batches are reproducible and
//! balanced.

use digitsense_core::{Digit, NUM_CLASSES, canonical, catalog};
use digitsense_synth::{
    BatchOptions, generate_batch, messy_style, random_style, render_canonical, render_sample,
};
use digitsense_test::RegParams;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn render_reg_shapes() {
    let mut rp = RegParams::new("render_shapes");
    let mut rng = StdRng::seed_from_u64(2024);

    for template in catalog().iter() {
        let style = random_style(&mut rng);
        let sample = render_sample(template, &style, &mut rng).expect("render jittered");
        rp.compare_values(784.0, sample.len() as f64, 0.0);
        let (lo, hi) = sample.min_max();
        rp.check(lo >= 0.0 && hi <= 1.0, "jittered sample in [0, 1]");

        let style = messy_style(&mut rng);
        let sample = render_sample(template, &style, &mut rng).expect("render messy");
        rp.compare_values(784.0, sample.len() as f64, 0.0);
        let (lo, hi) = sample.min_max();
        rp.check(lo >= 0.0 && hi <= 1.0, "messy sample in [0, 1]");
    }

    assert!(rp.cleanup(), "render_shapes regression test failed");
}

#[test]
fn render_reg_canonical() {
    let mut rp = RegParams::new("render_canonical");

    for digit in Digit::ALL {
        let grid = render_canonical(canonical(digit)).expect("render canonical");
        rp.check(grid.count_above(0.5) > 40, "canonical rendering has ink");
        rp.write_grid_and_check(&grid).expect("write canonical");
    }

    // No randomness: rendering twice is identical
    let a = render_canonical(canonical(Digit::from_index(5))).expect("first");
    let b = render_canonical(canonical(Digit::from_index(5))).expect("second");
    rp.compare_grids(&a, &b, 0.0);

    assert!(rp.cleanup(), "render_canonical regression test failed");
}

#[test]
fn render_reg_seeded_samples() {
    let mut rp = RegParams::new("render_seeded");

    let template = canonical(Digit::from_index(4));
    let style = random_style(&mut StdRng::seed_from_u64(1));
    let a = render_sample(template, &style, &mut StdRng::seed_from_u64(99)).expect("a");
    let b = render_sample(template, &style, &mut StdRng::seed_from_u64(99)).expect("b");
    let c = render_sample(template, &style, &mut StdRng::seed_from_u64(100)).expect("c");
    rp.compare_grids(&a, &b, 0.0);
    rp.check(a != c, "different seeds give different samples");
    rp.write_grid_and_check(&a).expect("write seeded");

    assert!(rp.cleanup(), "render_seeded regression test failed");
}

#[test]
fn render_reg_batch() {
    let mut rp = RegParams::new("render_batch");

    let options = BatchOptions::new().with_samples_per_digit(6).with_seed(17);
    let first = generate_batch(&options).expect("first batch");
    let second = generate_batch(&options).expect("second batch");
    rp.compare_values(60.0, first.len() as f64, 0.0);
    rp.check(first == second, "batch is reproducible per seed");

    let mut histogram = [0usize; NUM_CLASSES];
    for sample in &first {
        histogram[sample.label.index()] += 1;
        let hot = sample.one_hot();
        rp.compare_values(1.0, hot.iter().sum::<f32>() as f64, 0.0);
        rp.compare_values(1.0, hot[sample.label.index()] as f64, 0.0);
    }
    for count in histogram {
        rp.compare_values(6.0, count as f64, 0.0);
    }

    // Shuffling only permutes: the unshuffled batch holds the same samples
    let ordered = generate_batch(&options.clone().with_shuffle(false)).expect("ordered");
    let all_present = ordered.iter().all(|s| first.contains(s));
    rp.check(all_present, "shuffle keeps samples paired with labels");
    let labels: Vec<usize> = first.iter().map(|s| s.label.index()).collect();
    let sorted = labels.windows(2).all(|w| w[0] <= w[1]);
    rp.check(!sorted, "shuffled batch is not in label order");

    let other = generate_batch(&options.clone().with_seed(18)).expect("other seed");
    rp.check(first != other, "different seeds give different batches");

    assert!(rp.cleanup(), "render_batch regression test failed");
}
