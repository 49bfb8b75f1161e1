use itertools::Itertools;
use note_duration::{
    closest_type, dotted_match, quarter_length_to_units,
    quarter_length_to_units_with, DurationSettings, NoteType, UnitSpec,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn total(units: &[UnitSpec]) -> f64 {
    units.iter().map(|unit| unit.quarter_length).sum()
}

#[test]
fn concrete_cases() {
    init();
    assert_eq!(dotted_match(3.0, 4), Some((1, NoteType::Half)));
    assert_eq!(dotted_match(1.75, 4), Some((2, NoteType::Quarter)));
    assert_eq!(dotted_match(1.6, 4), None);
    assert_eq!(closest_type(0.75).unwrap(), (NoteType::Eighth, false));
    assert_eq!(
        quarter_length_to_units(2.5, None)
            .unwrap()
            .iter()
            .map(UnitSpec::to_tuple)
            .collect_vec(),
        vec![
            (2.0, NoteType::Half, 0, None, None, None),
            (0.5, NoteType::Eighth, 0, None, None, None),
        ]
    );
}

#[test]
fn reference_lengths_are_single_units() {
    init();
    for note_type in NoteType::ALL {
        let units =
            quarter_length_to_units(note_type.reference_length(), None)
                .unwrap();
        assert_eq!(
            units.iter().map(UnitSpec::to_tuple).collect_vec(),
            vec![(note_type.reference_length(), note_type, 0, None, None, None)]
        );
    }
}

#[test]
fn round_trip() {
    init();
    let quantities = (1..=64)
        .map(|sixteenths| sixteenths as f64 / 16.0)
        .chain((1..=24).map(|thirds| thirds as f64 / 3.0))
        .chain((1..=10).map(|fifths| fifths as f64 / 5.0))
        .chain([0.001, 0.3, 7.1, 129.5, 1000.0 / 7.0]);
    for quantity in quantities {
        let units = quarter_length_to_units(quantity, None).unwrap();
        assert!(!units.is_empty(), "{quantity}");
        assert!(
            (total(&units) - quantity).abs() <= 1e-6 * quantity.max(1.0),
            "{quantity}: {units:?}"
        );
    }
}

#[test]
fn deterministic() {
    init();
    for quantity in [2.5, 4.0 + 1.0 / 3.0, 0.3, 17.0 / 12.0] {
        assert_eq!(
            quarter_length_to_units(quantity, Some(0.5)).unwrap(),
            quarter_length_to_units(quantity, Some(0.5)).unwrap()
        );
        assert_eq!(
            quarter_length_to_units(quantity, None).unwrap(),
            quarter_length_to_units(quantity, None).unwrap()
        );
    }
}

#[test]
fn dot_monotonicity() {
    init();
    let settings = DurationSettings::default();
    for (note_type, dots) in
        itertools::iproduct!(NoteType::ALL, 0..settings.max_dots)
    {
        assert!(
            note_type.dotted_length(dots + 1) > note_type.dotted_length(dots)
        );
    }
}

#[test]
fn restricted_settings() {
    init();
    let settings = DurationSettings::new(1);
    // double dotted quarter is out of the budget, split heads are undotted
    let units = quarter_length_to_units_with(1.75, None, &settings).unwrap();
    assert_eq!(
        units.iter().map(|u| (u.note_type, u.dots)).collect_vec(),
        vec![(NoteType::Quarter, 0), (NoteType::Eighth, 1)]
    );
}
