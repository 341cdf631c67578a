//! Statistical behavior of weighted dataset trees.

use datasynth::dataset::{AtomicDataset, CompositeDataset, Dataset};
use datasynth::factory::{build_dataset, DatasetConfig, SequenceRegistry};
use datasynth::generators::ConstantGenerator;
use datasynth::{GeneratorContext, GeneratorError, ValueGenerator};

fn leaf(name: &str, value: f64) -> Dataset<f64> {
    Dataset::Atomic(AtomicDataset::new(
        name,
        Box::new(ConstantGenerator::new(value)),
    ))
}

/// `numbers = {one: 1, two: 2}` with values 1.0 and 2.0.
fn one_two_tree() -> Dataset<f64> {
    let mut numbers = CompositeDataset::new("numbers");
    numbers.add_sub_dataset(leaf("one", 1.0), 1.0).unwrap();
    numbers.add_sub_dataset(leaf("two", 2.0), 2.0).unwrap();
    Dataset::Composite(numbers)
}

/// `any = {small: 1, large: 1}`, `small = {one: 1, two: 2}`, `large = {ten: 1}`.
fn nested_tree() -> Dataset<f64> {
    let mut small = CompositeDataset::new("small");
    small.add_sub_dataset(leaf("one", 1.0), 1.0).unwrap();
    small.add_sub_dataset(leaf("two", 2.0), 2.0).unwrap();

    let mut large = CompositeDataset::new("large");
    large.add_sub_dataset(leaf("ten", 10.0), 1.0).unwrap();

    let mut any = CompositeDataset::new("any");
    any.add_sub_dataset(Dataset::Composite(small), 1.0).unwrap();
    any.add_sub_dataset(Dataset::Composite(large), 1.0).unwrap();
    Dataset::Composite(any)
}

#[test]
fn test_two_to_one_weighting_ratio() {
    let mut tree = one_two_tree();
    tree.init(&GeneratorContext::new(42)).unwrap();

    let draws = 1000;
    let mut twos = 0;
    for _ in 0..draws {
        if tree.generate().unwrap().unwrap() == 2.0 {
            twos += 1;
        }
    }

    let share = twos as f64 / draws as f64;
    assert!(
        (share - 2.0 / 3.0).abs() < 0.07,
        "share of 'two' over {draws} draws: {share}"
    );
}

#[test]
fn test_nested_probabilities_compose_multiplicatively() {
    let mut tree = nested_tree();
    tree.init(&GeneratorContext::new(42)).unwrap();

    // P(one) = P(small) * P(one | small) = 1/2 * 1/3 = 1/6.
    let draws = 10_000;
    let mut ones = 0;
    for _ in 0..draws {
        if tree.generate().unwrap().unwrap() == 1.0 {
            ones += 1;
        }
    }

    let share = ones as f64 / draws as f64;
    assert!(
        (share - 1.0 / 6.0).abs() < 0.03,
        "share of value 1 over {draws} draws: {share}"
    );
}

#[test]
fn test_generate_for_dataset_ignores_top_level_weights() {
    let mut tree = one_two_tree();
    tree.init(&GeneratorContext::new(42)).unwrap();

    for _ in 0..100 {
        assert_eq!(tree.generate_for_dataset("two").unwrap(), Some(2.0));
    }
}

#[test]
fn test_generate_for_dataset_uses_branch_internal_weighting() {
    let mut tree = nested_tree();
    tree.init(&GeneratorContext::new(42)).unwrap();

    // Forcing the "small" branch still applies small's own 1:2 weighting.
    let draws = 1000;
    let mut twos = 0;
    for _ in 0..draws {
        let value = tree.generate_for_dataset("small").unwrap().unwrap();
        assert!(value == 1.0 || value == 2.0);
        if value == 2.0 {
            twos += 1;
        }
    }
    let share = twos as f64 / draws as f64;
    assert!(
        (share - 2.0 / 3.0).abs() < 0.07,
        "share of 'two' within forced branch: {share}"
    );
}

#[test]
fn test_generate_for_dataset_unknown_name() {
    let mut tree = one_two_tree();
    tree.init(&GeneratorContext::new(42)).unwrap();
    assert!(matches!(
        tree.generate_for_dataset("unknown"),
        Err(GeneratorError::DatasetNotFound(_))
    ));
}

#[test]
fn test_generate_for_dataset_does_not_resolve_deep_names() {
    let mut tree = nested_tree();
    tree.init(&GeneratorContext::new(42)).unwrap();

    // "one" is a grandchild; only the node itself and immediate children match.
    assert!(matches!(
        tree.generate_for_dataset("one"),
        Err(GeneratorError::DatasetNotFound(_))
    ));
}

#[test]
fn test_close_twice_does_not_fail() {
    let mut tree = nested_tree();
    tree.init(&GeneratorContext::new(42)).unwrap();
    tree.close();
    tree.close();
}

#[test]
fn test_generate_before_init_fails_fast() {
    let mut tree = one_two_tree();
    assert!(matches!(
        tree.generate(),
        Err(GeneratorError::NotInitialized(_))
    ));
}

#[test]
fn test_same_seed_replays_identical_values() {
    let mut a = nested_tree();
    let mut b = nested_tree();
    a.init(&GeneratorContext::new(42)).unwrap();
    b.init(&GeneratorContext::new(42)).unwrap();

    for _ in 0..100 {
        assert_eq!(a.generate().unwrap(), b.generate().unwrap());
    }
}

const TREE_YAML: &str = r#"
kind: composite
name: any
children:
  - kind: composite
    name: small
    weight: 1.0
    children:
      - kind: atomic
        name: one
        weight: 1.0
        generator: { type: constant, value: 1.0 }
      - kind: atomic
        name: two
        weight: 2.0
        generator: { type: constant, value: 2.0 }
  - kind: composite
    name: large
    weight: 1.0
    children:
      - kind: atomic
        name: ten
        weight: 1.0
        generator: { type: constant, value: 10.0 }
"#;

#[test]
fn test_tree_built_from_yaml_behaves_like_handmade() {
    let config = DatasetConfig::from_yaml(TREE_YAML).unwrap();
    let registry = SequenceRegistry::default();
    let mut tree = build_dataset(&config, &registry).unwrap();
    tree.init(&GeneratorContext::new(42)).unwrap();

    let names: Vec<&str> = tree
        .all_atomic_subsets()
        .iter()
        .map(|d| d.name())
        .collect();
    assert_eq!(names, vec!["one", "two", "ten"]);

    let draws = 10_000;
    let mut ones = 0;
    for _ in 0..draws {
        if tree.generate().unwrap().unwrap() == 1.0 {
            ones += 1;
        }
    }
    let share = ones as f64 / draws as f64;
    assert!(
        (share - 1.0 / 6.0).abs() < 0.03,
        "share of value 1 over {draws} draws: {share}"
    );

    tree.close();
}
