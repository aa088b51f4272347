//! Learn command: prints reading material on trunk-based development.

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;

use crate::education::{links_for, Topic};

const INTRO: &str = "\
Trunk-based development keeps everyone committing to a single shared branch
in small, frequent changes. Short-lived branches are fine, but they live for
hours or days, not weeks. Unfinished work ships behind feature flags, and a
fast CI pipeline keeps the trunk releasable at all times.

Compared to Git Flow there is no develop branch, no long-running release
branches and no separate hotfix path: releases are cut from the trunk.";

/// Learn command options.
#[derive(Parser)]
pub struct LearnCommand {
    /// Only show links for one topic.
    #[arg(long, value_enum)]
    pub topic: Option<Topic>,
}

impl LearnCommand {
    /// Executes the learn command.
    pub fn execute(self) -> Result<()> {
        let stdout = io::stdout();
        write_learn(&mut stdout.lock(), self.topic)?;
        Ok(())
    }
}

fn write_learn<W: Write>(out: &mut W, topic: Option<Topic>) -> io::Result<()> {
    if topic.is_none() {
        writeln!(out, "{INTRO}")?;
        writeln!(out)?;
    }

    let topics = match topic {
        Some(topic) => vec![topic],
        None => Topic::ALL.to_vec(),
    };
    for topic in topics {
        writeln!(out, "{}", topic.heading())?;
        for link in links_for(topic) {
            writeln!(out, "  • {}", link.title)?;
            writeln!(out, "    {}", link.url)?;
            writeln!(out, "    {}", link.description)?;
        }
        writeln!(out)?;
    }

    Ok(())
}
