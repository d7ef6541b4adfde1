use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Send a single question to the financial agent
    Ask {
        query: String,

        /// Print the raw chat response as JSON (the failure response when the probe finds the service down)
        #[arg(long)]
        json: bool,
    },

    /// Report whether the financial agent service is reachable
    Status,

    /// Start an interactive chat session on stdin (`/history` shows the transcript, `/quit` exits)
    Chat,
}
