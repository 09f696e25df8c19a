use clap::Parser;
use serde_json::value::to_raw_value;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use edge_gateway::gateway::types::{error_message, first_candidate_text, ChatRequest, Turn};

#[derive(Parser)]
#[command(name = "chat-cli")]
#[command(about = "Terminal chat client for the edge gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Chat endpoint path on the gateway
    #[arg(short, long, default_value = "/api/chat")]
    path: String,

    /// API key sent when the gateway has none configured
    #[arg(short, long)]
    key: Option<String>,
}

/// Conversation held in memory only.
struct Session {
    client: reqwest::Client,
    endpoint: String,
    key: Option<String>,
    history: Vec<Turn>,
}

impl Session {
    async fn send(&mut self, prompt: &str) -> Result<String, String> {
        self.history.push(Turn::user(prompt));
        match self.exchange().await {
            Ok(text) => {
                self.history.push(Turn::model(text.clone()));
                Ok(text)
            }
            Err(e) => {
                // Keep history consistent with what the upstream accepted.
                self.history.pop();
                Err(e)
            }
        }
    }

    async fn exchange(&self) -> Result<String, String> {
        let messages = self
            .history
            .iter()
            .map(to_raw_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())?;
        let request = ChatRequest {
            messages: Some(messages),
            api_key: self.key.clone(),
        };
        let res = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = res.status();
        let body: Value = res.json().await.map_err(|e| e.to_string())?;
        if !status.is_success() {
            return Err(error_message(&body)
                .map(str::to_string)
                .unwrap_or_else(|| format!("gateway returned status {}", status)));
        }

        first_candidate_text(&body)
            .map(str::to_string)
            .ok_or_else(|| "the model returned no content; please retry".to_string())
    }
}

/// Join the gateway base URL and the chat path with exactly one slash.
fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut session = Session {
        client: reqwest::Client::new(),
        endpoint: endpoint(&cli.url, &cli.path),
        key: cli.key,
        history: Vec::new(),
    };

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Connected to {}. /reset clears the conversation, /quit exits.", session.endpoint);

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "" => continue,
            "/quit" => break,
            "/reset" => {
                session.history.clear();
                println!("Conversation reset.");
            }
            prompt => match session.send(prompt).await {
                Ok(text) => println!("{}\n", text),
                Err(e) => eprintln!("Error: {}\n", e),
            },
        }
    }

    Ok(())
}
