//! Write command implementation
//!
//! Write-back to the controller is not supported; the command only reports
//! that nothing was sent.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the write command
#[derive(Args, Debug)]
pub struct WriteArgs {
    /// YAML document with values to write
    pub yaml_file: PathBuf,
}

impl WriteArgs {
    /// Execute the write command
    pub async fn execute(&self, commpath: &str) -> anyhow::Result<i32> {
        tracing::info!(
            commpath,
            file = %self.yaml_file.display(),
            "Write requested"
        );
        println!(
            "Writing to the controller is not supported; {} was not sent to {commpath}",
            self.yaml_file.display()
        );
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_is_a_notice_only() {
        let args = WriteArgs {
            yaml_file: PathBuf::from("/nonexistent/values.yml"),
        };
        assert_eq!(args.execute("10.0.0.5").await.unwrap(), 0);
    }
}
