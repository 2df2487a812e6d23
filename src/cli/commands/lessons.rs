//! Lessons command - List stored lessons

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::{
    app::App,
    cli::{
        config::CommonArgs,
        output::{print_section, print_subsection},
    },
    lessons::LessonKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Win,
    Tie,
    NotLose,
}

impl From<KindArg> for LessonKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Win => LessonKind::Win,
            KindArg::Tie => LessonKind::Tie,
            KindArg::NotLose => LessonKind::NotLose,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "List the stored lessons")]
pub struct LessonsArgs {
    /// Only this lesson set (all three by default)
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,

    /// Print the rules as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn execute(args: LessonsArgs) -> Result<()> {
    let config = args.common.agent_config();
    let app = App::from_config(&config);
    let kinds = match args.kind {
        Some(kind) => vec![kind.into()],
        None => LessonKind::ALL.to_vec(),
    };

    if args.json {
        let mut sets = serde_json::Map::new();
        for kind in kinds {
            sets.insert(kind.to_string(), serde_json::to_value(app.lessons(kind)?)?);
        }
        println!("{}", serde_json::to_string_pretty(&sets)?);
        return Ok(());
    }

    print_section(&format!("Lessons in {}", config.lessons_dir.display()));
    for kind in kinds {
        let rules = app.lessons(kind)?;
        print_subsection(&format!("{kind} ({} rules)", rules.len()));
        for rule in &rules {
            println!("  {rule}");
        }
    }
    Ok(())
}
