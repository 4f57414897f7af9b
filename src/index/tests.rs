use super::*;

use std::collections::HashMap;

use crate::concept::ConceptKind;

mod cosine_tests {
    use super::*;

    #[test]
    fn test_cosine_identical_vectors() {
        let v = vec![0.5, 0.3, 0.2, 0.1];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_mismatched_lengths() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_empty_vectors() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_cosine_zero_norm() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }
}

mod backend_tests {
    use super::*;
    use std::sync::Arc;

    fn backend_of(vectors: Vec<Vec<f32>>) -> ExactScanBackend {
        ExactScanBackend::new(vectors.into_iter().map(Arc::new).collect())
    }

    #[test]
    fn test_nearest_orders_by_distance() {
        let backend = backend_of(vec![
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![0.7071, 0.7071],
        ]);

        let neighbors = backend.nearest(&[1.0, 0.0], 3);
        let offsets: Vec<usize> = neighbors.iter().map(|(o, _)| *o).collect();
        assert_eq!(offsets, vec![1, 2, 0]);
    }

    #[test]
    fn test_nearest_truncates_to_k() {
        let backend = backend_of(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]);
        let neighbors = backend.nearest(&[1.0, 0.0], 2);
        assert_eq!(neighbors.len(), 2);
    }

    #[test]
    fn test_nearest_tie_break_by_offset() {
        let backend = backend_of(vec![vec![1.0, 0.0], vec![1.0, 0.0], vec![2.0, 0.0]]);
        let neighbors = backend.nearest(&[1.0, 0.0], 3);
        // All three are cosine-identical to the query; insertion order wins.
        let offsets: Vec<usize> = neighbors.iter().map(|(o, _)| *o).collect();
        assert_eq!(offsets, vec![0, 1, 2]);
    }

    #[test]
    fn test_nearest_k_larger_than_len() {
        let backend = backend_of(vec![vec![1.0, 0.0]]);
        let neighbors = backend.nearest(&[1.0, 0.0], 10);
        assert_eq!(neighbors.len(), 1);
    }

    #[test]
    fn test_backend_len() {
        let backend = backend_of(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert_eq!(backend.len(), 2);
        assert!(!backend.is_empty());
    }
}

mod index_tests {
    use super::*;
    use std::sync::Arc;

    use crate::concept::Concept;
    use crate::embedding::ConceptEmbedder;

    fn concept(name: &str) -> Concept {
        Concept::new(
            name,
            ConceptKind::Technique,
            format!("{name} description"),
            "methodology",
            0.9,
        )
        .unwrap()
    }

    fn fixture_embedder(entries: &[(&Concept, Vec<f32>)]) -> Arc<ConceptEmbedder> {
        let mut vectors = HashMap::new();
        for (concept, vector) in entries {
            vectors.insert(concept.embed_key(), vector.clone());
        }
        Arc::new(ConceptEmbedder::fixture(vectors, 4))
    }

    #[tokio::test]
    async fn test_build_rejects_empty_input() {
        let embedder = Arc::new(ConceptEmbedder::fixture(HashMap::new(), 4));
        let result = ConceptIndex::build(&[], embedder).await;
        assert!(matches!(result, Err(IndexError::EmptyInput)));
    }

    #[tokio::test]
    async fn test_build_preserves_insertion_order() {
        let a = concept("alpha");
        let b = concept("beta");
        let embedder = fixture_embedder(&[
            (&a, vec![1.0, 0.0, 0.0, 0.0]),
            (&b, vec![0.0, 1.0, 0.0, 0.0]),
        ]);

        let index = ConceptIndex::build(&[a.clone(), b.clone()], embedder)
            .await
            .expect("build");

        assert_eq!(index.len(), 2);
        assert_eq!(index.texts(), &[a.embed_key(), b.embed_key()]);
    }

    #[tokio::test]
    async fn test_query_returns_exact_similarity() {
        let a = concept("alpha");
        let b = concept("beta");
        let mut vectors = HashMap::new();
        vectors.insert(a.embed_key(), vec![1.0, 0.0, 0.0, 0.0]);
        vectors.insert(b.embed_key(), vec![0.0, 1.0, 0.0, 0.0]);
        vectors.insert("query".to_string(), vec![0.6, 0.8, 0.0, 0.0]);
        let embedder = Arc::new(ConceptEmbedder::fixture(vectors, 4));

        let index = ConceptIndex::build(&[a.clone(), b.clone()], embedder)
            .await
            .expect("build");
        let neighbors = index.query("query", 2).await.expect("query");

        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[0].text, b.embed_key());
        assert!((neighbors[0].similarity - 0.8).abs() < 1e-5);
        assert_eq!(neighbors[1].text, a.embed_key());
        assert!((neighbors[1].similarity - 0.6).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_query_respects_k() {
        let concepts: Vec<Concept> =
            ["a", "b", "c", "d"].iter().map(|n| concept(n)).collect();
        let embedder = Arc::new(ConceptEmbedder::fixture(HashMap::new(), 4));

        let index = ConceptIndex::build(&concepts, embedder).await.expect("build");
        let neighbors = index.query("anything", 2).await.expect("query");
        assert_eq!(neighbors.len(), 2);
    }

    #[tokio::test]
    async fn test_query_similarity_clamped_to_zero() {
        let a = concept("alpha");
        let mut vectors = HashMap::new();
        vectors.insert(a.embed_key(), vec![1.0, 0.0, 0.0, 0.0]);
        vectors.insert("anti".to_string(), vec![-1.0, 0.0, 0.0, 0.0]);
        let embedder = Arc::new(ConceptEmbedder::fixture(vectors, 4));

        let index = ConceptIndex::build(&[a], embedder).await.expect("build");
        let neighbors = index.query("anti", 1).await.expect("query");

        assert_eq!(neighbors[0].similarity, 0.0);
    }

    #[tokio::test]
    async fn test_query_is_deterministic() {
        let concepts: Vec<Concept> =
            ["x", "y", "z"].iter().map(|n| concept(n)).collect();
        let embedder = Arc::new(ConceptEmbedder::fixture(HashMap::new(), 4));
        let index = ConceptIndex::build(&concepts, embedder).await.expect("build");

        let first = index.query("repeat", 3).await.expect("query");
        let second = index.query("repeat", 3).await.expect("query");
        assert_eq!(first, second);
    }
}
