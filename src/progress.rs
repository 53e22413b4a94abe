//! Progress bar display for installations

use indicatif::{ProgressBar, ProgressStyle};

const MAX_PATH_WIDTH: usize = 50;

/// Progress display for an install run
pub struct ProgressDisplay {
    /// One bar for the components, one tick per component finished
    component_pb: ProgressBar,
    /// File bar, one tick per decision processed
    file_pb: ProgressBar,
}

impl ProgressDisplay {
    pub fn new(total_components: u64, total_files: u64) -> Self {
        let component_style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let file_style = ProgressStyle::default_bar()
            .template("  [{bar:40.green/yellow}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ");

        let component_pb = ProgressBar::new(total_components);
        component_pb.set_style(component_style);

        let file_pb = ProgressBar::new(total_files);
        file_pb.set_style(file_style);

        Self {
            component_pb,
            file_pb,
        }
    }

    /// Show the component whose files are being processed
    pub fn update_component(&self, name: &str, current: usize, total: usize) {
        self.component_pb
            .set_message(format!("({current}/{total}) {name}"));
    }

    pub fn inc_component(&self) {
        self.component_pb.inc(1);
    }

    /// Advance the file bar
    pub fn update_file(&self, file_path: &str) {
        self.file_pb.set_message(truncate_path(file_path));
        self.file_pb.inc(1);
    }

    pub fn finish(&self) {
        self.file_pb.finish();
        self.component_pb.finish();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.file_pb.abandon();
        self.component_pb.abandon();
    }
}

/// Keep the tail of long paths
fn truncate_path(path: &str) -> String {
    let count = path.chars().count();
    if count <= MAX_PATH_WIDTH {
        return path.to_string();
    }
    let tail: String = path.chars().skip(count - (MAX_PATH_WIDTH - 3)).collect();
    format!("...{tail}")
}
