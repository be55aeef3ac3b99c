//! Fetch annotations from a mock GOlr server and convert them.

use golr_client::{GolrClient, GolrConfig};
use golr_core::Error;
use golr_graph::{ConversionOptions, DocumentConverter, EntityMap};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn envelope(num_found: u64, start: u64, docs: Vec<Value>) -> Value {
    json!({
        "responseHeader": {"status": 0, "QTime": 4},
        "response": {"numFound": num_found, "start": start, "docs": docs}
    })
}

fn annotation(bioentity: &str, label: &str, cls: &str, extensions: Vec<&str>) -> Value {
    json!({
        "source": "UniProtKB",
        "bioentity": bioentity,
        "bioentity_label": label,
        "annotation_class": cls,
        "evidence_type": "IMP",
        "aspect": "P",
        "taxon": "NCBITaxon:9606",
        "annotation_extension_json": extensions
    })
}

async fn client_for(server: &MockServer) -> GolrClient {
    GolrClient::new(
        GolrConfig::default()
            .with_server_url(format!("{}/solr", server.uri()))
            .with_page_size(2)
            .with_backoff_ms(0, 0),
    )
    .unwrap()
}

#[tokio::test]
async fn test_paged_annotations_convert_into_one_graph() {
    let server = MockServer::start().await;
    let occurs_in = r#"{"relationship":{"relation":[{"id":"BFO:0000066","label":"occurs_in"}],"id":"CL:0000540","label":"neuron"}}"#;

    let pages = [
        (
            0u64,
            vec![
                annotation("UniProtKB:P04637", "TP53", "GO:0006915", vec![occurs_in]),
                annotation("UniProtKB:P38398", "BRCA1", "GO:0006281", vec![]),
            ],
        ),
        (
            2,
            vec![annotation("UniProtKB:P04637", "TP53", "GO:0008285", vec![])],
        ),
    ];
    for (start, docs) in pages {
        Mock::given(method("GET"))
            .and(path("/solr/select"))
            .and(query_param("start", start.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(3, start, docs)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server).await;
    let docs = client
        .annotations_for_genes(["UniProtKB:P04637", "UniProtKB:P38398"])
        .await
        .unwrap();
    let graph = DocumentConverter::default().convert_documents(&docs).unwrap();

    assert_eq!(graph.annotations.len(), 3);
    assert_eq!(graph.entities.len(), 2);

    let groups = graph.annotations_by_entity();
    assert_eq!(groups[0].0.symbol.as_deref(), Some("TP53"));
    assert_eq!(groups[0].1.len(), 2);
    assert_eq!(groups[1].0.id, "UniProtKB:P38398");

    let extension = &graph.annotations[0].extension_expressions[0][0];
    assert_eq!(extension.relation, "BFO:0000066");
    assert_eq!(extension.cls, "CL:0000540");
}

#[tokio::test]
async fn test_tolerance_flag_controls_malformed_extensions() {
    let server = MockServer::start().await;
    let good = r#"{"relationship":{"relation":[{"id":"RO:0002233"}],"id":"CHEBI:15377"}}"#;
    let broken = r#"{"relationship":"#;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            1,
            0,
            vec![annotation(
                "UniProtKB:P04637",
                "TP53",
                "GO:0003677",
                vec![good, broken],
            )],
        )))
        .mount(&server)
        .await;

    let docs = client_for(&server)
        .await
        .annotations_for_gene("UniProtKB:P04637")
        .await
        .unwrap();

    let strict = DocumentConverter::default().convert(&docs, &mut EntityMap::new());
    assert!(matches!(strict, Err(Error::ExtensionParse(_))));

    let mut entities = EntityMap::new();
    let annotations = DocumentConverter::new(ConversionOptions::tolerant())
        .convert(&docs, &mut entities)
        .unwrap();
    assert_eq!(annotations[0].extension_expressions.len(), 1);
    assert_eq!(entities.len(), 1);
}
