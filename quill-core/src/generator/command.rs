//! Generator backed by an external command
//!
//! The command receives the rendered prompt as its last argument and must
//! print the article as a JSON object on stdout. Surrounding prose and a
//! ```json fence are tolerated.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::{prompts, ArticleBrief, ArticleGenerator};
use crate::config::GeneratorConfig;
use crate::{ArticlePayload, Error, Result};

/// Bytes of stderr kept in error messages
const STDERR_TAIL: usize = 500;

/// Runs a writer command such as `claude --print`
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    command: String,
    args: Vec<String>,
    model: Option<String>,
}

impl CommandGenerator {
    /// Create a generator for the given executable
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            model: None,
        }
    }

    /// Create a generator from configuration
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            model: config.model.clone(),
        }
    }

    /// Add arguments placed before the prompt
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Pass a model with `--model`
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    fn build_command(&self, prompt: &str) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args);

        if let Some(ref model) = self.model {
            cmd.arg("--model").arg(model);
        }

        cmd.arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        cmd
    }
}

#[async_trait]
impl ArticleGenerator for CommandGenerator {
    fn name(&self) -> &'static str {
        "command"
    }

    async fn generate(&self, brief: &ArticleBrief) -> Result<ArticlePayload> {
        let prompt = prompts::render(brief);
        debug!(command = %self.command, topic = %brief.topic, "Spawning article generator");

        let output = self
            .build_command(&prompt)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::Generator(format!(
                        "Generator executable not found at '{}'. Set generator.command in the config",
                        self.command
                    ))
                } else {
                    Error::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Generator(format!(
                "'{}' exited with {}: {}",
                self.command,
                output.status,
                tail(stderr.trim(), STDERR_TAIL)
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut payload = parse_article(&stdout)?;
        brief.apply_to(&mut payload);

        info!(topic = %brief.topic, title = %payload.title_en, "Generated article");
        Ok(payload)
    }
}

/// Pull the article JSON out of generator output
///
/// Each `{` is tried in order and the JSON parser decides where the object
/// ends, so fences and code blocks inside string values do not truncate it.
fn parse_article(output: &str) -> Result<ArticlePayload> {
    let mut first_error = None;

    for (start, _) in output.match_indices('{') {
        let mut stream = serde_json::Deserializer::from_str(&output[start..]).into_iter::<ArticlePayload>();
        match stream.next() {
            Some(Ok(payload)) => return Ok(payload),
            Some(Err(e)) => {
                first_error.get_or_insert(e);
            }
            None => {}
        }
    }

    Err(match first_error {
        Some(e) => Error::Generator(format!("Generator output is not a valid article: {}", e)),
        None => Error::Generator("Generator output contained no JSON object".to_string()),
    })
}

fn tail(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut start = text.len() - max;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    const ARTICLE_JSON: &str = r##"{
        "title_en": "Emergency Funds", "title_it": "Fondi di Emergenza", "title_es": "Fondos de Emergencia",
        "excerpt_en": "Why", "excerpt_it": "Perché", "excerpt_es": "Por qué",
        "content_en": "# EN", "content_it": "# IT", "content_es": "# ES",
        "category": "Investing", "tags": ["saving"]
    }"##;

    #[test]
    fn test_parse_plain_json() {
        let payload = parse_article(ARTICLE_JSON).unwrap();
        assert_eq!(payload.title_it, "Fondi di Emergenza");
    }

    #[test]
    fn test_parse_json_with_prose() {
        let output = format!("Here is your article:\n{}\nEnjoy!", ARTICLE_JSON);
        let payload = parse_article(&output).unwrap();
        assert_eq!(payload.tags, vec!["saving"]);
    }

    #[test]
    fn test_parse_fenced_json() {
        let output = format!("Sure.\n```json\n{}\n```\nNote: {{not json}}", ARTICLE_JSON);
        let payload = parse_article(&output).unwrap();
        assert_eq!(payload.content_es, "# ES");
    }

    #[test]
    fn test_fenced_json_with_code_block_in_content() {
        let output = concat!(
            "Here is the article.\n```json\n",
            r##"{"title_en": "Compound Growth", "title_it": "Crescita", "title_es": "Crecimiento","##,
            r##" "excerpt_en": "e", "excerpt_it": "e", "excerpt_es": "e","##,
            r##" "content_en": "# Formula\n\n```\nFV = P * (1 + r)^n\n```\n","##,
            r##" "content_it": "# IT", "content_es": "# ES", "category": "Investing", "tags": ["math"]}"##,
            "\n```\n"
        );

        let payload = parse_article(output).unwrap();
        assert_eq!(payload.content_en, "# Formula\n\n```\nFV = P * (1 + r)^n\n```\n");
        assert_eq!(payload.tags, vec!["math"]);
    }

    #[test]
    fn test_invalid_article_reports_parse_error() {
        let err = parse_article(r#"{"title_en": "x", "tags": "not-a-list"}"#).unwrap_err();
        assert!(err.to_string().contains("not a valid article"), "{}", err);
    }

    #[test]
    fn test_no_json_is_an_error() {
        let err = parse_article("I could not write that article.").unwrap_err();
        assert!(matches!(err, Error::Generator(_)));
    }

    #[test]
    fn test_tail_respects_char_boundaries() {
        assert_eq!(tail("short", 10), "short");
        assert_eq!(tail("ééé", 3), "é");
    }

    #[tokio::test]
    async fn test_missing_executable() {
        let generator = CommandGenerator::new("/nonexistent/quill-writer-12345");
        let err = generator.generate(&ArticleBrief::new("x")).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_generate_applies_brief() {
        let script = format!("cat <<'EOF'\n{}\nEOF", ARTICLE_JSON);
        let generator = CommandGenerator::new("sh").with_args(["-c", script.as_str(), "writer"]);

        let brief = ArticleBrief::new("emergency funds").with_category(Category::SavingEmergencyFund);
        let payload = generator.generate(&brief).await.unwrap();

        assert_eq!(payload.title_en, "Emergency Funds");
        assert_eq!(payload.category, "Saving & Emergency Fund");
        assert!(payload.validate().is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_reports_stderr() {
        let generator =
            CommandGenerator::new("sh").with_args(["-c", "echo 'quota exceeded' >&2; exit 3", "writer"]);

        let err = generator.generate(&ArticleBrief::new("x")).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("quota exceeded"), "{}", msg);
    }
}
