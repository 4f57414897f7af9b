use super::*;
use crate::concept::PaperSection;
use crate::matcher::{ConceptMatch, MatchStrength, SectionTag};

fn sample_match(similarity: f32) -> ConceptMatch {
    ConceptMatch {
        source_concept: "graph attention | description | section:methodology | type:technique"
            .to_string(),
        candidate_concept: "sparse attention | description | section:methods | type:technique"
            .to_string(),
        similarity,
        section: SectionTag::Methodology,
        strength: MatchStrength::classify(similarity),
    }
}

mod concept_parse_tests {
    use crate::textgen::parse::concept_records;

    const RECORDS_JSON: &str = r#"[
        {"name": "graph attention", "type": "technique", "description": "attention over graphs", "section": "methodology", "confidence": 0.9},
        {"name": "ogbn-arxiv", "type": "dataset", "description": "citation graph benchmark", "section": "experiments", "confidence": 0.8}
    ]"#;

    #[test]
    fn direct_json_array_parses() {
        let records = concept_records(RECORDS_JSON);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "graph attention");
        assert_eq!(records[1].kind, "dataset");
    }

    #[test]
    fn fenced_json_parses() {
        let content = format!("Here are the concepts:\n```json\n{RECORDS_JSON}\n```\nDone.");
        let records = concept_records(&content);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "ogbn-arxiv");
    }

    #[test]
    fn fence_tag_is_case_insensitive() {
        let content = format!("```JSON\n{RECORDS_JSON}\n```");
        assert_eq!(concept_records(&content).len(), 2);
    }

    #[test]
    fn prose_without_json_yields_empty() {
        assert!(concept_records("The paper discusses several novel techniques.").is_empty());
    }

    #[test]
    fn fenced_garbage_yields_empty() {
        assert!(concept_records("```json\nname: graph attention\n```").is_empty());
    }

    #[test]
    fn empty_content_yields_empty() {
        assert!(concept_records("").is_empty());
        assert!(concept_records("   \n  ").is_empty());
    }
}

mod recommendation_parse_tests {
    use crate::textgen::parse::recommendation_lines;

    #[test]
    fn numbered_decoration_is_stripped() {
        let lines =
            recommendation_lines("1. Cite the 2019 attention survey in the related work section");
        assert_eq!(
            lines,
            vec!["Cite the 2019 attention survey in the related work section"]
        );
    }

    #[test]
    fn bullet_decoration_is_stripped() {
        let lines = recommendation_lines("\u{2022} Compare against the BERT baseline models");
        assert_eq!(lines, vec!["Compare against the BERT baseline models"]);
    }

    #[test]
    fn short_lines_are_dropped() {
        let content = "Suggestions:\n1. Too short.\n2. Evaluate the method on a second benchmark";
        let lines = recommendation_lines(content);
        assert_eq!(lines, vec!["Evaluate the method on a second benchmark"]);
    }

    #[test]
    fn capped_at_five_lines() {
        let content = (1..=7)
            .map(|i| format!("{i}. Recommendation number {i} with enough length"))
            .collect::<Vec<_>>()
            .join("\n");
        let lines = recommendation_lines(&content);
        assert_eq!(lines.len(), 5);
        assert!(lines[4].starts_with("Recommendation number 5"));
    }

    #[test]
    fn lines_made_empty_by_stripping_are_dropped() {
        assert!(recommendation_lines("1234567890.- 123456789").is_empty());
    }

    #[test]
    fn empty_input_yields_empty() {
        assert!(recommendation_lines("").is_empty());
    }
}

mod heuristic_tests {
    use super::*;
    use crate::textgen::{HeuristicTextService, TextGeneration};

    #[tokio::test]
    async fn frequent_terms_become_technique_records() {
        let service = HeuristicTextService::new();
        let section = PaperSection::new(
            "methodology",
            "transformer attention transformer gradient attention transformer",
        );
        let records = service.extract_concepts(&[section]).await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "transformer");
        assert_eq!(records[1].name, "attention");
        assert_eq!(records[2].name, "gradient");
        assert!(records.iter().all(|r| r.kind == "technique"));
        assert!(records.iter().all(|r| r.section == "methodology"));
        assert!(records.iter().all(|r| r.confidence == Some(0.6)));
    }

    #[tokio::test]
    async fn filler_and_short_terms_are_skipped() {
        let service = HeuristicTextService::new();
        let section = PaperSection::new(
            "introduction",
            "however however proposed results graph sparse transformer",
        );
        let records = service.extract_concepts(&[section]).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "transformer");
    }

    #[tokio::test]
    async fn low_novelty_band_warns_about_overlap() {
        let service = HeuristicTextService::new();
        let lines = service.generate_recommendations(&[], 20.0).await.unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Substantial overlap"));
    }

    #[tokio::test]
    async fn high_novelty_band_emphasizes_framing() {
        let service = HeuristicTextService::new();
        let lines = service.generate_recommendations(&[], 85.0).await.unwrap();
        assert!(lines[0].contains("low"));
    }

    #[tokio::test]
    async fn top_match_reference_is_appended() {
        let service = HeuristicTextService::new();
        let lines = service
            .generate_recommendations(&[sample_match(0.91)], 55.0)
            .await
            .unwrap();
        assert_eq!(lines.len(), 4);
        assert!(lines[3].contains("91% similarity"));
        assert!(lines[3].contains("graph attention"));
    }
}

mod mock_tests {
    use super::*;
    use crate::concept::RawConceptRecord;
    use crate::textgen::{MockTextService, TextGenError, TextGeneration};

    #[tokio::test]
    async fn returns_configured_records() {
        let record = RawConceptRecord {
            name: "graph pooling".to_string(),
            kind: "technique".to_string(),
            ..RawConceptRecord::default()
        };
        let service = MockTextService::with_records(vec![record.clone()]);
        let records = service.extract_concepts(&[]).await.unwrap();
        assert_eq!(records, vec![record]);
    }

    #[tokio::test]
    async fn failing_service_errors_on_both_operations() {
        let service = MockTextService::failing();
        assert!(matches!(
            service.extract_concepts(&[]).await,
            Err(TextGenError::ProviderUnavailable { .. })
        ));
        assert!(matches!(
            service.generate_recommendations(&[], 50.0).await,
            Err(TextGenError::ProviderUnavailable { .. })
        ));
    }
}
