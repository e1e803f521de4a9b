//! `imgdl <URL>` – fetch every image of one post.

use anyhow::Result;
use imgdl_core::config::ImgdlConfig;
use imgdl_core::downloader::Outcome;
use imgdl_core::fetcher::{FetchEvent, Fetcher};
use imgdl_core::site::Retrieval;
use std::path::Path;

pub fn run_fetch(cfg: &ImgdlConfig, url: &str, base_dir: &Path, allow_render: bool) -> Result<()> {
    let fetcher = Fetcher::new(cfg, base_dir, allow_render);
    let mut position = 0usize;
    let mut found = 0usize;

    let summary = fetcher.run(url, |event| match event {
        FetchEvent::Classified(post) => {
            println!("Site: {}  Post: {}", post.site, post.identifier);
        }
        FetchEvent::Retrieving(request) => {
            let how = match request.retrieval {
                Retrieval::Static => "GET",
                Retrieval::Rendered { .. } => "render",
            };
            println!("Loading {} ({how})", request.url);
        }
        FetchEvent::Found(n) => {
            found = n;
            if n == 0 {
                println!("No images found.");
            } else {
                println!("Found {n} image(s)");
            }
        }
        FetchEvent::Image(image, outcome) => {
            position += 1;
            match outcome {
                Outcome::Downloaded { bytes } => {
                    println!("[{position}] {} ({bytes} bytes)", image.filename)
                }
                Outcome::Skipped => println!("[{position}] {} (exists, skipped)", image.filename),
                Outcome::Failed(e) => println!("[{position}] {} FAILED: {e}", image.filename),
            }
        }
    })?;

    if let Some(folder) = &summary.folder {
        let r = summary.report;
        println!(
            "Done: {} downloaded, {} skipped, {} failed -> {}",
            r.downloaded,
            r.skipped,
            r.failed,
            folder.display()
        );
        if r.total() < found {
            tracing::debug!(found, unique = r.total(), "duplicate image urls dropped");
        }
    }
    Ok(())
}
