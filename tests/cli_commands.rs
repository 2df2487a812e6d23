use clap::Parser;
use perceptris::{
    adapters::TextFileRepository,
    cli::commands::{
        learn::{self, LearnArgs},
        lessons::{self, LessonsArgs},
        respond::{self, RespondArgs},
    },
    lessons::LessonKind,
    ports::LessonRepository,
};
use tempfile::tempdir;

#[test]
fn learn_command_writes_lesson_files() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().to_str().unwrap();

    let args = LearnArgs::parse_from([
        "perceptris-learn",
        "--first",
        "computer",
        "--moves",
        "0,1,4,2,8",
        "--lessons-dir",
        dir,
        "--seed",
        "3",
    ]);
    learn::execute(args).expect("learning a finished match should succeed");

    let repo = TextFileRepository::new(tmp.path());
    assert_eq!(repo.load(LessonKind::Win).unwrap().len(), 2);
    assert!(repo.path(LessonKind::NotLose).exists());

    let args = LessonsArgs::parse_from(["perceptris-lessons", "--lessons-dir", dir, "--json"]);
    lessons::execute(args).expect("listing lessons should succeed");
}

#[test]
fn learn_command_rejects_unfinished_match() {
    let tmp = tempdir().unwrap();
    let args = LearnArgs::parse_from([
        "perceptris-learn",
        "--first",
        "human",
        "--moves",
        "4,0",
        "--lessons-dir",
        tmp.path().to_str().unwrap(),
    ]);
    let err = learn::execute(args).unwrap_err();
    assert!(err.to_string().contains("not finished"), "{err}");
    assert!(!TextFileRepository::new(tmp.path()).path(LessonKind::Win).exists());
}

#[test]
fn learn_command_rejects_repeated_cells() {
    let tmp = tempdir().unwrap();
    let args = LearnArgs::parse_from([
        "perceptris-learn",
        "--first",
        "computer",
        "--moves",
        "0,0",
        "--lessons-dir",
        tmp.path().to_str().unwrap(),
    ]);
    assert!(learn::execute(args).is_err());
}

#[test]
fn learn_command_rejects_moves_after_a_win() {
    let tmp = tempdir().unwrap();
    let args = LearnArgs::parse_from([
        "perceptris-learn",
        "--first",
        "computer",
        "--moves",
        "0,3,1,4,2,8",
        "--lessons-dir",
        tmp.path().to_str().unwrap(),
    ]);
    let err = learn::execute(args).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("invalid match"), "{message}");
    assert!(message.contains("decided"), "{message}");
    assert!(!TextFileRepository::new(tmp.path()).path(LessonKind::Win).exists());
}

#[test]
fn respond_command_accepts_boards() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().to_str().unwrap();

    let args = RespondArgs::parse_from(["perceptris-respond", "OO__X___X", "--json"]);
    respond::execute(args).expect("respond should succeed");

    let args = RespondArgs::parse_from([
        "perceptris-respond",
        "X___O____",
        "--lessons",
        "--lessons-dir",
        dir,
        "--seed",
        "1",
    ]);
    respond::execute(args).expect("respond with lessons should succeed");

    let args = RespondArgs::parse_from(["perceptris-respond", "OO_"]);
    assert!(respond::execute(args).is_err());
}
