//! Render command implementation.

use super::read_input;
use crate::cli::RenderArgs;
use crate::error::Result;
use crate::output::Formatter;
use minutes_domain::traits::{DocumentRenderer, LlmProvider};
use minutes_extractor::Extractor;
use minutes_render::{document_name, MarkdownRenderer};
use std::fmt::Display;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Execute the render command.
pub async fn execute_render<L>(
    args: RenderArgs,
    extractor: &Extractor<L>,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    let path = run_render(&args, extractor, &MarkdownRenderer::new()).await?;
    println!(
        "{}",
        formatter.success(&format!("Minutes written to {}", path.display()))
    );
    Ok(())
}

async fn run_render<L, R>(
    args: &RenderArgs,
    extractor: &Extractor<L>,
    renderer: &R,
) -> Result<PathBuf>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
    R: DocumentRenderer,
    crate::error::CliError: From<R::Error>,
{
    let text = read_input(&args.input)?;

    let record = if args.input.offline {
        extractor.extract_direct(&text)?.record
    } else {
        extractor.generate(&text).await?.record
    };

    let destination = match &args.output {
        Some(path) => path.clone(),
        None => {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            PathBuf::from(document_name(timestamp, renderer.extension()))
        }
    };

    Ok(renderer.render(&record, &destination)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::InputArgs;
    use minutes_extractor::ExtractorConfig;
    use minutes_llm::MockProvider;

    const MEETING_TEXT: &str = "一是项目当前进度，由张三负责；二是遇到的问题，由李四准备相关资料。";

    fn args(output: PathBuf, offline: bool) -> RenderArgs {
        RenderArgs {
            input: InputArgs {
                text: Some(MEETING_TEXT.to_string()),
                file: None,
                stdin: false,
                offline,
            },
            output: Some(output),
        }
    }

    #[tokio::test]
    async fn test_render_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("minutes").join("weekly.md");
        let extractor = Extractor::new(MockProvider::default(), ExtractorConfig::default());

        let renderer = MarkdownRenderer::new();
        let path = run_render(&args(destination.clone(), false), &extractor, &renderer)
            .await
            .unwrap();
        assert_eq!(path, destination);

        let document = std::fs::read_to_string(&path).unwrap();
        assert!(document.starts_with("# 会议记录"));
        assert!(document.contains("项目当前进度"));
        assert!(document.contains("相关资料"));
    }

    #[tokio::test]
    async fn test_offline_render_skips_model() {
        let dir = tempfile::tempdir().unwrap();
        let llm = MockProvider::new("会议主题：不应出现");
        let extractor = Extractor::new(llm.clone(), ExtractorConfig::default());

        let renderer = MarkdownRenderer::new();
        let path = run_render(&args(dir.path().join("out.md"), true), &extractor, &renderer)
            .await
            .unwrap();
        assert!(path.exists());
        assert_eq!(llm.call_count(), 0);
    }
}
