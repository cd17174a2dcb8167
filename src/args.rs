use clap::Parser;

/// Command-line arguments.
///
/// The session is purely interactive; everything else is read from the
/// environment (or a `.env` file).
#[derive(Parser, Debug)]
#[command(name = "job-scout")]
#[command(about = "Chat with a job-search assistant that can scrape live listings")]
#[command(
    long_about = "Chat with a job-search assistant that can scrape live listings.\n\n\
    Required environment: PROJECT_ENDPOINT, MODEL_DEPLOYMENT_NAME.\n\
    Optional: AGENT_API_KEY, SCRAPE_DO_TOKEN, SCRAPE_PROXY_URL, JOB_SEARCH_URL,\n\
    HTTP_TIMEOUT_SECS.\n\
    Type `quit` to end the session."
)]
#[command(version)]
pub struct Args {}
