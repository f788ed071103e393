// src/pipeline.rs

use anyhow::{bail, Context, Result};
use glob::{glob, Pattern};
use std::{fs, path::PathBuf, time::Instant};
use tracing::info;

use crate::config::Config;
use crate::output::{write_tables, Tables};
use crate::process::split::split_zip_into_tables;

/// Counts for one finished run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub archives: usize,
    pub entries: usize,
    pub skipped_entries: usize,
    pub client_rows: usize,
    pub campaign_rows: usize,
    pub economics_rows: usize,
    /// Files published into the output directory.
    pub written: Vec<PathBuf>,
}

/// Archive discovery → split → clean → accumulate → publish.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The `*.zip` files directly inside the input directory, in path order.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let dir = &self.config.input_dir;
        let meta = fs::metadata(dir).with_context(|| format!("reading input dir {:?}", dir))?;
        if !meta.is_dir() {
            bail!("input path {:?} is not a directory", dir);
        }

        let pattern = format!("{}/*.zip", Pattern::escape(&dir.to_string_lossy()));
        let mut archives = Vec::new();
        for entry in glob(&pattern).with_context(|| format!("bad glob pattern {}", pattern))? {
            let path = entry.context("listing input dir")?;
            if path.is_file() {
                archives.push(path);
            }
        }
        archives.sort();
        Ok(archives)
    }

    /// Run the whole batch.
    ///
    /// Nothing is published until every archive has been consumed, so a fatal
    /// error anywhere leaves the output directory without new tables.
    pub fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();
        let out_dir = &self.config.output_dir;
        fs::create_dir_all(out_dir)
            .with_context(|| format!("creating output dir {:?}", out_dir))?;

        let archives = self.discover()?;
        info!(
            "{} archive(s) in {}",
            archives.len(),
            self.config.input_dir.display()
        );

        let mut tables = Tables::default();
        let mut summary = RunSummary {
            archives: archives.len(),
            ..RunSummary::default()
        };
        for zip_path in &archives {
            info!("processing {}", zip_path.display());
            let stats = split_zip_into_tables(zip_path, &mut tables)?;
            summary.entries += stats.entries;
            summary.skipped_entries += stats.skipped_entries;
        }

        summary.client_rows = tables.client.len();
        summary.campaign_rows = tables.campaign.len();
        summary.economics_rows = tables.economics.len();
        summary.written = write_tables(
            &tables,
            out_dir,
            &self.config.table_names,
            self.config.format,
        )?;

        info!(
            client = summary.client_rows,
            campaign = summary.campaign_rows,
            economics = summary.economics_rows,
            files = summary.written.len(),
            "all done in {:?}",
            start.elapsed()
        );
        Ok(summary)
    }
}
