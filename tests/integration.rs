// ABOUTME: Integration tests verifying modules work together.
// ABOUTME: Runs local agents against a recording model and remote agents against a mock server.

use std::sync::{Arc, Mutex};

use relay::local::{InMemorySource, LocalAgentResolver};
use relay::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Answers every turn with a fixed text and remembers what it was asked.
struct RecordingClient {
    answer: String,
    requests: Mutex<Vec<Request>>,
}

impl RecordingClient {
    fn new(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: answer.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for RecordingClient {
    async fn create_message(&self, req: &Request) -> Result<Response, LlmError> {
        self.requests.lock().unwrap().push(req.clone());
        Ok(Response::from_text(&req.model, &self.answer))
    }
}

/// A tool that does nothing useful; only its name matters here.
struct NamedTool(&'static str);

#[async_trait::async_trait]
impl Tool for NamedTool {
    fn name(&self) -> &str {
        self.0
    }

    fn description(&self) -> &str {
        "A baseline capability"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({"type": "object"})
    }

    async fn execute(&self, _params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        Ok(ToolResult::text("ok"))
    }
}

async fn baseline_tools() -> Registry {
    let registry = Registry::new();
    registry.register(NamedTool("Read")).await;
    registry.register(NamedTool("Bash")).await;
    registry
}

fn router(client: Arc<RecordingClient>) -> ModelRouter {
    ModelRouter::new(
        "anthropic",
        Provider::new(client, "claude-sonnet-4-5").alias("haiku", "claude-haiku-4-5"),
    )
}

const RESEARCHER: &str = "---
name: researcher
description: Researches questions
tools: Read
---
You are a researcher.";

async fn local_dispatcher(client: Arc<RecordingClient>) -> Dispatcher {
    let source = InMemorySource::new().with_document("doc://research.md", RESEARCHER);
    let local = SubagentType::new(
        Arc::new(LocalAgentResolver::new(Arc::new(source))),
        Arc::new(LocalAgentExecutor::new(baseline_tools().await, router(client))),
    );

    Dispatcher::builder()
        .reference(SubagentReference::new(
            "doc://research.md",
            LocalAgentDefinition::KIND,
        ))
        .subagent_type(local)
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_local_agent_end_to_end() {
    init_tracing();
    let client = RecordingClient::new("4");
    let dispatcher = local_dispatcher(client.clone()).await;

    assert_eq!(dispatcher.catalog(), "- researcher: Researches questions");

    let outcome = dispatcher
        .run_task(TaskRequest::new("researcher", "What is 2+2?").description("Add numbers"))
        .await;
    assert_eq!(outcome, TaskOutcome::Completed("4".to_string()));

    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.system.as_deref(), Some("You are a researcher."));
    assert_eq!(request.model, "claude-sonnet-4-5");
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, Role::User);
    assert_eq!(request.messages[0].text(), "What is 2+2?");
    assert_eq!(request.tool_names(), vec!["Read"]);
}

#[tokio::test]
async fn test_model_override_through_task_tool() {
    let client = RecordingClient::new("done");
    let dispatcher = Arc::new(local_dispatcher(client.clone()).await);

    let result = dispatcher
        .task_tool()
        .execute(serde_json::json!({
            "description": "Quick lookup",
            "prompt": "Look it up",
            "subagent_type": "researcher",
            "model": "haiku"
        }))
        .await
        .unwrap();

    assert!(!result.is_error);
    assert_eq!(result.content, "done");
    assert_eq!(client.requests()[0].model, "claude-haiku-4-5");
}

#[tokio::test]
async fn test_background_flow_through_tools() {
    let client = RecordingClient::new("background answer");
    let dispatcher = Arc::new(local_dispatcher(client).await);

    let started = dispatcher
        .task_tool()
        .execute(serde_json::json!({
            "description": "Research",
            "prompt": "Dig in",
            "subagent_type": "researcher",
            "run_in_background": true
        }))
        .await
        .unwrap();
    assert!(!started.is_error);
    let task_id = started.metadata["task_id"].as_str().unwrap().to_string();
    assert!(started.content.contains("Use task_output tool"));

    let output = dispatcher
        .output_tool()
        .execute(serde_json::json!({"task_id": task_id, "timeout": 5000}))
        .await
        .unwrap();
    assert!(!output.is_error);
    assert_eq!(
        output.content,
        format!("Task ID: {task_id}\nStatus: completed\n\nResult:\nbackground answer")
    );

    let missing = dispatcher
        .output_tool()
        .execute(serde_json::json!({"task_id": "task_unknown"}))
        .await
        .unwrap();
    assert!(missing.is_error);
}

#[tokio::test]
async fn test_config_driven_discovery_with_skills() {
    let agents = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(agents.path().join("nested")).unwrap();
    std::fs::write(
        agents.path().join("nested/reviewer.md"),
        "---\nname: reviewer\ndescription: Reviews code\nskills: rust-style\n---\nYou review code.",
    )
    .unwrap();

    let skills = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(skills.path().join("rust-style")).unwrap();
    std::fs::write(
        skills.path().join("rust-style/SKILL.md"),
        "---\ndescription: House style\n---\nPrefer iterators.",
    )
    .unwrap();

    let config = DispatchConfig {
        agent_dirs: vec![agents.path().to_path_buf()],
        skill_dirs: vec![skills.path().to_path_buf()],
        ..DispatchConfig::default()
    };

    let client = RecordingClient::new("looks good");
    let executor = LocalAgentExecutor::new(baseline_tools().await, router(client.clone()))
        .skills(Arc::new(config.load_skills().await.unwrap()));
    let dispatcher = DispatcherBuilder::from_config(&config)
        .unwrap()
        .subagent_type(SubagentType::new(
            Arc::new(LocalAgentResolver::default()),
            Arc::new(executor),
        ))
        .build()
        .await
        .unwrap();

    assert_eq!(dispatcher.names(), ["reviewer"]);
    let outcome = dispatcher
        .run_task(TaskRequest::new("reviewer", "Review main.rs"))
        .await;
    assert_eq!(outcome, TaskOutcome::Completed("looks good".to_string()));

    let system = client.requests()[0].system.clone().unwrap();
    assert!(system.starts_with("You review code."));
    assert!(system.contains("Prefer iterators."));
}

async fn mount_weather_agent(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/.well-known/agent-card.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "weather",
            "description": "Reports the weather",
            "url": format!("{}/rpc", server.uri()),
            "version": "1.0.0",
            "capabilities": {"streaming": false}
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rpc"))
        .respond_with(|request: &wiremock::Request| {
            let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0",
                "id": body["id"],
                "result": {
                    "kind": "task",
                    "id": "task-1",
                    "contextId": "ctx-1",
                    "status": {"state": "completed"},
                    "artifacts": [
                        {"artifactId": "a1", "parts": [{"kind": "text", "text": "Sunny, "}]},
                        {"artifactId": "a2", "parts": [{"kind": "text", "text": "22C"}]}
                    ]
                }
            }))
        })
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_remote_agent_end_to_end() {
    init_tracing();
    let server = MockServer::start().await;
    mount_weather_agent(&server).await;

    let dispatcher = Dispatcher::builder()
        .reference(SubagentReference::new(server.uri(), RemoteAgentDefinition::KIND))
        .subagent_type(relay::remote::subagent_type())
        .build()
        .await
        .unwrap();

    assert_eq!(dispatcher.catalog(), "- weather: Reports the weather");

    let outcome = dispatcher
        .run_task(TaskRequest::new("weather", "Weather in Lisbon?"))
        .await;
    assert_eq!(outcome, TaskOutcome::Completed("Sunny, 22C".to_string()));
}

#[tokio::test]
async fn test_remote_agent_error_is_reported_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/agent-card.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "flaky",
            "description": "Usually down",
            "url": format!("{}/rpc", server.uri())
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rpc"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let dispatcher = Dispatcher::builder()
        .reference(SubagentReference::new(server.uri(), RemoteAgentDefinition::KIND))
        .subagent_type(relay::remote::subagent_type())
        .build()
        .await
        .unwrap();

    let outcome = dispatcher.run_task(TaskRequest::new("flaky", "ping")).await;
    assert_eq!(
        outcome,
        TaskOutcome::Failed(
            "Error communicating with agent 'flaky': Protocol error: HTTP 503 - overloaded"
                .to_string()
        )
    );
}

#[tokio::test]
async fn test_mixed_local_and_remote_catalog() {
    let server = MockServer::start().await;
    mount_weather_agent(&server).await;

    let client = RecordingClient::new("unused");
    let source = InMemorySource::new().with_document("doc://research.md", RESEARCHER);
    let dispatcher = Dispatcher::builder()
        .reference(SubagentReference::new(
            "doc://research.md",
            LocalAgentDefinition::KIND,
        ))
        .reference(SubagentReference::new(server.uri(), RemoteAgentDefinition::KIND))
        .subagent_type(SubagentType::new(
            Arc::new(LocalAgentResolver::new(Arc::new(source))),
            Arc::new(LocalAgentExecutor::new(Registry::new(), router(client))),
        ))
        .subagent_type(relay::remote::subagent_type())
        .build()
        .await
        .unwrap();

    assert_eq!(
        dispatcher.catalog(),
        "- researcher: Researches questions\n- weather: Reports the weather"
    );
    let description = Arc::new(dispatcher).task_tool().description().to_string();
    assert!(description.contains("- weather: Reports the weather"));
}

#[tokio::test]
async fn test_unreachable_remote_agent_fails_build() {
    let err = Dispatcher::builder()
        .reference(SubagentReference::new(
            "http://127.0.0.1:1",
            RemoteAgentDefinition::KIND,
        ))
        .subagent_type(relay::remote::subagent_type())
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigError::Resolve(ResolveError::Fetch { .. })));
}
