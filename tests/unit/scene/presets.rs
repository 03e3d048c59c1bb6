use super::*;

#[test]
fn table_order_and_values() {
    let all = aspect_presets();
    assert_eq!(all.len(), 14);
    assert_eq!(all[0].label, "Free");
    assert_eq!(all[0].value, FREE_ASPECT_RATIO);
    assert_eq!(all[13].label, "Panorama");
    assert_eq!(all[13].value, 3.0);
    assert!((find_aspect("A-Series").unwrap().value - 0.7071).abs() < 1e-4);
    assert!((find_aspect("16:9").unwrap().value - 1.7778).abs() < 1e-4);
}

#[test]
fn categories_partition_the_table() {
    let counts: Vec<usize> = AspectCategory::ALL
        .iter()
        .map(|c| presets_in(*c).count())
        .collect();
    assert_eq!(counts, vec![7, 3, 2, 2]);
    assert_eq!(counts.iter().sum::<usize>(), aspect_presets().len());
}

#[test]
fn lookup_is_case_insensitive() {
    assert_eq!(find_aspect(" golden ").unwrap().value, 1.618);
    assert!(find_aspect("5:7").is_none());
}

#[test]
fn non_free_ratios_are_positive() {
    for p in aspect_presets().iter().skip(1) {
        assert!(p.value > 0.0, "{}", p.label);
    }
}
