use crate::agent::Agent;
use std::fmt;
use std::future::Future;
use std::io::{self, BufRead, Write};
use tokio::sync::mpsc;

/// Line that ends the session, compared ignoring ASCII case
pub const QUIT_TOKEN: &str = "quit";

/// Author of a transcript turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Agent,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Agent => f.write_str("agent"),
        }
    }
}

/// One entry of the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// Ordered log of every user and agent turn of one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        self.turns.push(Turn {
            role,
            text: text.into(),
        });
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Transcript ---")?;
        for turn in &self.turns {
            writeln!(f, "[{}] {}", turn.role, turn.text)?;
        }
        Ok(())
    }
}

/// Whether a line asks to end the session
pub fn is_quit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(QUIT_TOKEN)
}

/// Read lines from `reader` on a dedicated thread and forward them over a channel.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected. The channel
/// closes at end of input or on a read error. The thread is detached, so a read
/// still blocked on the console never holds up shutdown.
pub fn spawn_line_reader<R>(mut reader: R) -> mpsc::Receiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);

    std::thread::spawn(move || {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    ::log::error!("Failed to read input: {}", e);
                    break;
                }
            }

            let line = String::from_utf8_lossy(&buf)
                .trim_end_matches(['\n', '\r'])
                .to_string();
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    rx
}

/// What handling one input line led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The quit token was entered
    Quit,
    /// Blank line; nothing was recorded
    Skipped,
    /// The agent answered
    Replied(String),
    /// The agent run failed; the session goes on
    Failed(String),
}

/// Drives the read, run, respond loop against an [`Agent`] and keeps the transcript
pub struct Conversation<A: Agent> {
    agent: A,
    transcript: Transcript,
}

impl<A: Agent> Conversation<A> {
    pub fn new(agent: A) -> Self {
        Self {
            agent,
            transcript: Transcript::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    /// Handle a single line of user input
    pub async fn submit(&mut self, line: &str) -> Step {
        if is_quit(line) {
            return Step::Quit;
        }

        let text = line.trim();
        if text.is_empty() {
            return Step::Skipped;
        }

        self.transcript.push(Role::User, text);

        match self.agent.run(text).await {
            Ok(reply) => {
                self.transcript.push(Role::Agent, reply.clone());
                Step::Replied(reply)
            }
            Err(e) => {
                ::log::error!("Agent run failed: {}", e);
                Step::Failed(e.to_string())
            }
        }
    }

    /// Run the interactive loop until quit, end of input or `interrupt` resolves,
    /// then write the full transcript to `out`.
    pub async fn run<W, S>(
        &mut self,
        mut lines: mpsc::Receiver<String>,
        out: &mut W,
        interrupt: S,
    ) -> io::Result<()>
    where
        W: Write,
        S: Future<Output = ()>,
    {
        tokio::pin!(interrupt);

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let line = tokio::select! {
                biased;
                _ = &mut interrupt => {
                    writeln!(out)?;
                    ::log::info!("Interrupted while waiting for input");
                    break;
                }
                line = lines.recv() => line,
            };

            let Some(line) = line else {
                writeln!(out)?;
                ::log::debug!("End of input");
                break;
            };

            let step = tokio::select! {
                biased;
                _ = &mut interrupt => {
                    ::log::info!("Interrupted while the agent was running");
                    break;
                }
                step = self.submit(&line) => step,
            };

            match step {
                Step::Quit => break,
                Step::Skipped => continue,
                Step::Replied(reply) => writeln!(out, "\nAgent: {}\n", reply)?,
                Step::Failed(reason) => {
                    writeln!(out, "\nAgent run failed: {}. You can try again.\n", reason)?
                }
            }
        }

        write!(out, "\n{}", self.transcript)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::future::pending;
    use std::time::Duration;
    use tokio::sync::oneshot;

    /// Agent answering from a script and recording what it was sent
    #[derive(Default)]
    struct ScriptedAgent {
        replies: VecDeque<Result<String, AgentError>>,
        inputs: Vec<String>,
    }

    impl ScriptedAgent {
        fn with_replies(replies: Vec<Result<String, AgentError>>) -> Self {
            Self {
                replies: replies.into(),
                inputs: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl Agent for ScriptedAgent {
        async fn run(&mut self, input: &str) -> Result<String, AgentError> {
            self.inputs.push(input.to_string());
            self.replies
                .pop_front()
                .unwrap_or_else(|| Ok(format!("echo: {input}")))
        }
    }

    /// Agent that signals once it has been called and then never answers
    struct StallingAgent {
        started: Option<oneshot::Sender<()>>,
    }

    #[async_trait]
    impl Agent for StallingAgent {
        async fn run(&mut self, _input: &str) -> Result<String, AgentError> {
            if let Some(started) = self.started.take() {
                let _ = started.send(());
            }
            pending::<Result<String, AgentError>>().await
        }
    }

    async fn run_session(
        agent: ScriptedAgent,
        input: &'static [u8],
    ) -> (Conversation<ScriptedAgent>, String) {
        let mut conversation = Conversation::new(agent);
        let mut out = Vec::new();
        conversation
            .run(spawn_line_reader(input), &mut out, pending::<()>())
            .await
            .unwrap();
        (conversation, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_is_quit_ignores_case() {
        assert!(is_quit("quit"));
        assert!(is_quit("QUIT"));
        assert!(is_quit("QuIt"));
        assert!(is_quit("  quit \n"));
        assert!(!is_quit("quit now"));
        assert!(!is_quit("q"));
    }

    #[tokio::test]
    async fn test_quit_is_not_sent_to_agent() {
        let mut conversation = Conversation::new(ScriptedAgent::default());
        assert_eq!(conversation.submit("QuIt").await, Step::Quit);
        assert!(conversation.agent().inputs.is_empty());
        assert!(conversation.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_blank_lines_are_skipped() {
        let mut conversation = Conversation::new(ScriptedAgent::default());
        assert_eq!(conversation.submit("").await, Step::Skipped);
        assert_eq!(conversation.submit("   \t ").await, Step::Skipped);
        assert!(conversation.transcript().is_empty());
        assert!(conversation.agent().inputs.is_empty());
    }

    #[tokio::test]
    async fn test_reply_is_recorded() {
        let agent = ScriptedAgent::with_replies(vec![Ok("Here are 3 jobs".to_string())]);
        let mut conversation = Conversation::new(agent);

        let step = conversation.submit("  find rust jobs in Berlin ").await;
        assert_eq!(step, Step::Replied("Here are 3 jobs".to_string()));

        let turns = conversation.transcript().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].text, "find rust jobs in Berlin");
        assert_eq!(turns[1].role, Role::Agent);
        assert_eq!(turns[1].text, "Here are 3 jobs");
    }

    #[tokio::test]
    async fn test_failed_run_keeps_user_turn_only() {
        let agent = ScriptedAgent::with_replies(vec![Err(AgentError::EmptyResponse)]);
        let mut conversation = Conversation::new(agent);

        let step = conversation.submit("hello").await;
        assert!(matches!(step, Step::Failed(_)));
        assert_eq!(conversation.transcript().len(), 1);
        assert_eq!(conversation.transcript().turns()[0].role, Role::User);
    }

    #[tokio::test]
    async fn test_session_until_quit() {
        let input = b"hello\n\n   \nsecond\nQUIT\nafter quit\n";
        let (conversation, out) = run_session(ScriptedAgent::default(), input).await;

        assert_eq!(conversation.agent().inputs, vec!["hello", "second"]);
        assert_eq!(conversation.transcript().len(), 4);
        assert!(out.contains("Agent: echo: hello"));
        assert!(out.contains(
            "--- Transcript ---\n\
             [user] hello\n\
             [agent] echo: hello\n\
             [user] second\n\
             [agent] echo: second\n"
        ));
        assert!(!out.contains("after quit"));
    }

    #[tokio::test]
    async fn test_failure_does_not_end_session() {
        let agent = ScriptedAgent::with_replies(vec![
            Err(AgentError::ToolRounds(5)),
            Ok("second try worked".to_string()),
        ]);
        let (conversation, out) = run_session(agent, b"first\nretry\nquit\n").await;

        assert!(out.contains("Agent run failed:"));
        assert!(out.contains("Agent: second try worked"));
        assert_eq!(conversation.transcript().len(), 3);
    }

    #[tokio::test]
    async fn test_end_of_input_prints_transcript() {
        let (conversation, out) = run_session(ScriptedAgent::default(), b"only line").await;

        assert_eq!(conversation.transcript().len(), 2);
        assert!(out.ends_with("[user] only line\n[agent] echo: only line\n"));
    }

    #[tokio::test]
    async fn test_interrupt_ends_loop_gracefully() {
        let mut conversation = Conversation::new(ScriptedAgent::default());
        let mut out = Vec::new();
        conversation
            .run(spawn_line_reader(&b"hello\n"[..]), &mut out, async {})
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(conversation.agent().inputs.is_empty());
        assert!(out.contains("--- Transcript ---"));
    }

    #[tokio::test]
    async fn test_interrupt_during_agent_run() {
        let (started_tx, started_rx) = oneshot::channel();
        let mut conversation = Conversation::new(StallingAgent {
            started: Some(started_tx),
        });
        let mut out = Vec::new();
        let interrupt = async move {
            let _ = started_rx.await;
        };

        tokio::time::timeout(
            Duration::from_secs(5),
            conversation.run(
                spawn_line_reader(&b"find rust jobs\nsecond\n"[..]),
                &mut out,
                interrupt,
            ),
        )
        .await
        .expect("interrupt should end the loop")
        .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(conversation.transcript().len(), 1);
        assert!(!out.contains("Agent:"));
        assert!(out.ends_with("--- Transcript ---\n[user] find rust jobs\n"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_keeps_session_alive() {
        let (conversation, out) =
            run_session(ScriptedAgent::default(), b"hello\n\xff\xfe\n").await;

        assert_eq!(conversation.agent().inputs, vec!["hello", "\u{fffd}\u{fffd}"]);
        assert!(out.contains("--- Transcript ---\n[user] hello\n[agent] echo: hello\n"));
        assert!(out.ends_with("[agent] echo: \u{fffd}\u{fffd}\n"));
    }

    #[tokio::test]
    async fn test_line_reader_strips_line_endings() {
        let mut lines = spawn_line_reader(&b"first\r\nsecond\nlast"[..]);

        assert_eq!(lines.recv().await.as_deref(), Some("first"));
        assert_eq!(lines.recv().await.as_deref(), Some("second"));
        assert_eq!(lines.recv().await.as_deref(), Some("last"));
        assert_eq!(lines.recv().await, None);
    }
}
