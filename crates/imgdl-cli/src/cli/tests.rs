//! CLI parse and prompt tests.

use super::prompt::read_url_from;
use super::Cli;
use clap::Parser;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_url_only() {
    let cli = parse(&["imgdl", "https://blog.naver.com/jypentertainment/224072207277"]);
    assert_eq!(
        cli.url.as_deref(),
        Some("https://blog.naver.com/jypentertainment/224072207277")
    );
    assert!(cli.dir.is_none());
    assert!(!cli.static_only);
}

#[test]
fn cli_parse_no_args_prompts_later() {
    let cli = parse(&["imgdl"]);
    assert!(cli.url.is_none());
}

#[test]
fn cli_parse_dir_and_static_only() {
    let cli = parse(&[
        "imgdl",
        "--dir",
        "/tmp/pics",
        "--static-only",
        "https://weverse.io/nmixx/media/4-1",
    ]);
    assert_eq!(cli.dir, Some(PathBuf::from("/tmp/pics")));
    assert!(cli.static_only);
    assert_eq!(cli.url.as_deref(), Some("https://weverse.io/nmixx/media/4-1"));
}

#[test]
fn cli_parse_rejects_unknown_flag() {
    assert!(Cli::try_parse_from(["imgdl", "--overwrite"]).is_err());
}

#[test]
fn cli_parse_rejects_two_urls() {
    assert!(Cli::try_parse_from(["imgdl", "https://a.example/1", "https://b.example/2"]).is_err());
}

#[test]
fn prompt_reads_trimmed_line() {
    let mut input = "  https://post.naver.com/viewer/postView.naver?volumeNo=1  \n".as_bytes();
    let mut output = Vec::new();
    let url = read_url_from(&mut input, &mut output).unwrap();
    assert_eq!(url, "https://post.naver.com/viewer/postView.naver?volumeNo=1");
    assert_eq!(output, b"Enter URL: ");
}

#[test]
fn prompt_rejects_empty_input() {
    let mut output = Vec::new();
    assert!(read_url_from(&mut "\n".as_bytes(), &mut output).is_err());
    assert!(read_url_from(&mut "".as_bytes(), &mut output).is_err());
}
