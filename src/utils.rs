use std::time::Duration;

use indicatif::ProgressStyle;
use ureq::{Agent, AgentBuilder};

pub fn agent() -> Agent {
    AgentBuilder::new()
        .user_agent(concat!(
            "openaip-frequencies/",
            env!("CARGO_PKG_VERSION")
        ))
        .timeout(Duration::from_secs(60))
        .build()
}

pub fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("[{elapsed_precise}] {human_pos}/{human_len} {msg}")
        .expect("hardcoded")
}
