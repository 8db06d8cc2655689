//! Integration tests for the minutes HTTP service

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use minutes_domain::UNSPECIFIED;
use minutes_extractor::{Extractor, ExtractorConfig, RecordSource};
use minutes_llm::MockProvider;
use minutes_render::MarkdownRenderer;
use minutes_server::handlers::{
    create_router, AppState, ErrorResponse, ExtractResponse, HealthCheckResponse,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

const MEETING_TEXT: &str = "明天上午10点在三楼会议室开个关于项目进度的会议，参加的有张三、李四和王五，\
会议大概开1小时，主要讨论三个议题：一是项目当前进度，由张三负责；二是遇到的问题，由李四准备相关资料；三是下一步计划，王五负责。";

const LABELED_TEXT: &str = "会议主题：季度复盘\n主持人：王经理\n会议地点：A座501\n\
参会人员：赵六，钱七\n会议时长：2小时\n议题1：销售回顾\n负责人：赵六\n会前准备：销售报表\n";

const MODEL_OUTPUT: &str = "好的\n---\n会议主题：季度复盘\n主持人：\n会议地点：A座501\n\
参会人员：张三、李四\n会议时长：2小时\n议题1：销售回顾\n负责人：张三\n会前准备：销售报表\n";

/// Helper to create a router backed by a mock model
fn create_test_app(llm: MockProvider, output_dir: &Path) -> Router {
    let state = AppState {
        extractor: Arc::new(Extractor::new(llm, ExtractorConfig::default())),
        renderer: Arc::new(MarkdownRenderer::new()),
        output_dir: output_dir.to_path_buf(),
    };
    create_router(state)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn text_body(text: &str) -> String {
    serde_json::json!({ "text": text }).to_string()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(MockProvider::default(), dir.path());

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthCheckResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.message, "服务运行正常");
}

#[tokio::test]
async fn test_extract_confident_text_skips_model() {
    let dir = tempfile::tempdir().unwrap();
    let llm = MockProvider::new("会议主题：不应出现");
    let app = create_test_app(llm.clone(), dir.path());

    let response = app
        .oneshot(post_json("/extract", &text_body(MEETING_TEXT)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let extracted: ExtractResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(extracted.success);
    assert_eq!(extracted.source, RecordSource::Primary);
    assert_eq!(extracted.raw_text, MEETING_TEXT);
    assert_eq!(extracted.data.theme, "项目进度");
    assert_eq!(extracted.data.location, "三楼会议室");
    assert_eq!(extracted.data.attendees, "张三，李四，王五");
    assert_eq!(extracted.data.topics.len(), 3);
    assert_eq!(extracted.data.topics[1].preparation, "相关资料");
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn test_extract_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(MockProvider::default(), dir.path());

    let response = app
        .oneshot(post_json("/extract", &text_body(MEETING_TEXT)))
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["meeting_type"], "项目会议");
    assert_eq!(json["data"]["topics"][0]["topic"], "项目当前进度");
    assert_eq!(json["data"]["topics"][0]["leader"], "张三");
    assert_eq!(json["data"]["topics"][0]["preparation"], "无");
}

#[tokio::test]
async fn test_extract_low_confidence_merges_model_output() {
    let dir = tempfile::tempdir().unwrap();
    let llm = MockProvider::new(MODEL_OUTPUT);
    let app = create_test_app(llm.clone(), dir.path());

    let response = app
        .oneshot(post_json("/extract", &text_body("主持人：王经理")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let extracted: ExtractResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(llm.call_count(), 1);
    assert_eq!(extracted.source, RecordSource::Merged);
    assert_eq!(extracted.data.host, "王经理");
    assert_eq!(extracted.data.theme, "季度复盘");
    assert!(extracted.raw_text.starts_with("会议主题：季度复盘"));
}

#[tokio::test]
async fn test_extract_model_failure_still_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(MockProvider::failing(), dir.path());

    let response = app
        .oneshot(post_json("/extract", &text_body("主持人：王经理")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let extracted: ExtractResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(extracted.success);
    assert_eq!(extracted.source, RecordSource::PrimaryFallback);
    assert_eq!(extracted.data.host, "王经理");
    assert_eq!(extracted.data.theme, UNSPECIFIED);
    assert_eq!(extracted.raw_text, "主持人：王经理");
}

#[tokio::test]
async fn test_extract_empty_text_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();

    for body in [r#"{}"#.to_string(), text_body(""), text_body("  \n ")] {
        let app = create_test_app(MockProvider::default(), dir.path());
        let response = app.oneshot(post_json("/extract", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ErrorResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.error, "请提供会议文本内容");
    }
}

#[tokio::test]
async fn test_generate_returns_markdown_attachment() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(MockProvider::default(), dir.path());

    let response = app
        .oneshot(post_json("/generate", &text_body(MEETING_TEXT)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"meeting_"));
    assert!(disposition.ends_with(".md\""));

    let document = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(document.starts_with("# 会议记录"));
    assert!(document.contains("项目进度"));
    assert!(document.contains("相关资料"));

    // The document is also kept in the output directory
    let written: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(written.len(), 1);
}

#[tokio::test]
async fn test_generate_requests_write_separate_documents() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(MockProvider::failing(), dir.path());

    let (first, second) = tokio::join!(
        app.clone()
            .oneshot(post_json("/generate", &text_body(MEETING_TEXT))),
        app.clone()
            .oneshot(post_json("/generate", &text_body(LABELED_TEXT))),
    );
    let first = String::from_utf8(body_bytes(first.unwrap()).await).unwrap();
    let second = String::from_utf8(body_bytes(second.unwrap()).await).unwrap();
    assert!(first.contains("项目进度"));
    assert!(!first.contains("季度复盘"));
    assert!(second.contains("季度复盘"));
    assert!(!second.contains("项目进度"));

    // Each response is the document its own request wrote
    let mut written: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| std::fs::read_to_string(entry.unwrap().path()).unwrap())
        .collect();
    written.sort();
    let mut served = vec![first, second];
    served.sort();
    assert_eq!(written, served);
}

#[tokio::test]
async fn test_generate_replaces_low_confidence_record() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(MockProvider::new(MODEL_OUTPUT), dir.path());

    let response = app
        .oneshot(post_json("/generate", &text_body("主持人：王经理")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let document = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(document.contains("季度复盘"));
    assert!(document.contains("销售报表"));
    // Replaced rather than merged: the model left the host empty
    assert!(!document.contains("王经理"));
}

#[tokio::test]
async fn test_generate_empty_text_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(MockProvider::default(), dir.path());

    let response = app
        .oneshot(post_json("/generate", &text_body("")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_generate_unwritable_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the output directory should be
    let blocker = dir.path().join("output");
    std::fs::write(&blocker, "not a directory").unwrap();

    let app = create_test_app(MockProvider::default(), &blocker);
    let response = app
        .oneshot(post_json("/generate", &text_body(MEETING_TEXT)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error: ErrorResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(error.error.starts_with("文档生成失败"));
}
