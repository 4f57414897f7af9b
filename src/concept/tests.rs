use super::*;

fn concept(name: &str, kind: ConceptKind, section: &str) -> Concept {
    Concept::new(name, kind, format!("{name} description"), section, 0.9)
        .unwrap()
}

#[test]
fn test_concept_new_rejects_empty_name() {
    let result = Concept::new("   ", ConceptKind::Algorithm, "d", "s", 0.5);
    assert!(matches!(result, Err(ConceptError::EmptyName)));
}

#[test]
fn test_concept_new_rejects_out_of_range_confidence() {
    let too_high = Concept::new("adam", ConceptKind::Algorithm, "d", "s", 1.2);
    assert!(matches!(
        too_high,
        Err(ConceptError::ConfidenceOutOfRange { .. })
    ));

    let negative = Concept::new("adam", ConceptKind::Algorithm, "d", "s", -0.1);
    assert!(matches!(
        negative,
        Err(ConceptError::ConfidenceOutOfRange { .. })
    ));
}

#[test]
fn test_concept_new_accepts_confidence_bounds() {
    assert!(Concept::new("a", ConceptKind::Metric, "d", "s", 0.0).is_ok());
    assert!(Concept::new("a", ConceptKind::Metric, "d", "s", 1.0).is_ok());
}

#[test]
fn test_dedup_key_is_case_insensitive_on_name() {
    let a = concept("Gradient Descent", ConceptKind::Algorithm, "methodology");
    let b = concept("gradient descent", ConceptKind::Algorithm, "intro");
    assert_eq!(a.dedup_key(), b.dedup_key());
}

#[test]
fn test_dedup_key_distinguishes_kind() {
    let algo = concept("attention", ConceptKind::Algorithm, "methodology");
    let technique = concept("attention", ConceptKind::Technique, "methodology");
    assert_ne!(algo.dedup_key(), technique.dedup_key());
}

#[test]
fn test_embed_key_format_is_stable() {
    let c = Concept::new(
        "transformer",
        ConceptKind::Technique,
        "self-attention based encoder",
        "methodology",
        0.95,
    )
    .unwrap();
    assert_eq!(
        c.embed_key(),
        "transformer | self-attention based encoder | section:methodology | type:technique"
    );
}

#[test]
fn test_embed_key_equal_fields_equal_keys() {
    let a = concept("bleu", ConceptKind::Metric, "results");
    let b = concept("bleu", ConceptKind::Metric, "results");
    assert_eq!(a.embed_key(), b.embed_key());
}

#[test]
fn test_kind_parse_accepts_loose_casing() {
    assert_eq!(ConceptKind::parse(" Algorithm "), Some(ConceptKind::Algorithm));
    assert_eq!(ConceptKind::parse("DATASET"), Some(ConceptKind::Dataset));
    assert_eq!(ConceptKind::parse("figure"), Some(ConceptKind::Figure));
}

#[test]
fn test_kind_parse_rejects_unknown() {
    assert_eq!(ConceptKind::parse("paradigm"), None);
    assert_eq!(ConceptKind::parse(""), None);
}

#[test]
fn test_kind_serde_roundtrip_lowercase() {
    let json = serde_json::to_string(&ConceptKind::Equation).unwrap();
    assert_eq!(json, "\"equation\"");
    let back: ConceptKind = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ConceptKind::Equation);
}

#[test]
fn test_record_validate_applies_defaults() {
    let record = RawConceptRecord {
        name: "beam search".to_string(),
        ..Default::default()
    };
    let concept = record.validate().unwrap();
    assert_eq!(concept.kind, ConceptKind::Technique);
    assert_eq!(concept.section, "unknown");
    assert!((concept.confidence - 0.7).abs() < f32::EPSILON);
}

#[test]
fn test_record_validate_rejects_unknown_kind() {
    let record = RawConceptRecord {
        name: "beam search".to_string(),
        kind: "paradigm".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        record.validate(),
        Err(ConceptError::UnknownKind { .. })
    ));
}

#[test]
fn test_record_validate_rejects_missing_name() {
    let record = RawConceptRecord {
        description: "something without a name".to_string(),
        ..Default::default()
    };
    assert!(matches!(record.validate(), Err(ConceptError::EmptyName)));
}

#[test]
fn test_record_validate_rejects_bad_confidence() {
    let record = RawConceptRecord {
        name: "rouge".to_string(),
        kind: "metric".to_string(),
        confidence: Some(1.5),
        ..Default::default()
    };
    assert!(matches!(
        record.validate(),
        Err(ConceptError::ConfidenceOutOfRange { .. })
    ));
}

#[test]
fn test_record_deserializes_partial_json() {
    let json = r#"{"name": "cifar-10", "type": "dataset"}"#;
    let record: RawConceptRecord = serde_json::from_str(json).unwrap();
    let concept = record.validate().unwrap();
    assert_eq!(concept.kind, ConceptKind::Dataset);
    assert_eq!(concept.name, "cifar-10");
}

#[test]
fn test_section_word_count() {
    let section = PaperSection::new("abstract", "one two  three\nfour");
    assert_eq!(section.word_count, 4);
}

#[test]
fn test_structure_assign_concepts_files_by_section() {
    let mut structure = PaperStructure::new(
        "Test Paper",
        vec![
            PaperSection::new("abstract", "text"),
            PaperSection::new("methodology", "text"),
        ],
    );
    let concepts = vec![
        concept("sgd", ConceptKind::Algorithm, "methodology"),
        concept("nlp", ConceptKind::Domain, "abstract"),
        concept("orphan", ConceptKind::Technique, "appendix"),
    ];
    structure.assign_concepts(&concepts);

    assert_eq!(structure.total_concepts, 3);
    assert_eq!(structure.section("methodology").unwrap().concepts.len(), 1);
    assert_eq!(structure.section("abstract").unwrap().concepts.len(), 1);
}

#[test]
fn test_structure_assign_concepts_is_idempotent() {
    let mut structure = PaperStructure::new(
        "Test Paper",
        vec![PaperSection::new("methodology", "text")],
    );
    let concepts = vec![concept("sgd", ConceptKind::Algorithm, "methodology")];
    structure.assign_concepts(&concepts);
    structure.assign_concepts(&concepts);

    assert_eq!(structure.section("methodology").unwrap().concepts.len(), 1);
    assert_eq!(structure.total_concepts, 1);
}
