use std::io::Write;

use clap::Parser;
use sci0::{
    resources::{ResourceArchive, ResourceKey, ResourceType},
    utils::debug::hex_dump_to,
};

#[derive(Parser)]
pub(super) struct Dump {
    /// The type of the resource to dump (e.g. view, pic, script).
    #[clap(long = "type", short = 't')]
    res_type: ResourceType,

    /// The number of the resource to dump.
    #[clap(value_parser = clap::value_parser!(u16).range(0..=i64::from(ResourceKey::MAX_NUMBER)))]
    resource_num: u16,
}

impl Dump {
    pub(super) fn run(&self, archive: &ResourceArchive, out: &mut dyn Write) -> anyhow::Result<()> {
        let key = ResourceKey::new(self.res_type, self.resource_num);
        let res = archive
            .get(key)
            .ok_or_else(|| anyhow::anyhow!("Resource not found: {key}"))?;
        let data = res
            .record()
            .data()
            .map_err(|err| anyhow::anyhow!("Resource {key} failed to load: {err}"))?;
        hex_dump_to(out, data, 0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::tests::run_cli;

    #[test]
    fn dumps_decoded_bytes() {
        let (result, output) = run_cli(&["dump", "--type", "pic", "1"]);
        result.unwrap();
        assert!(output.lines().nth(2).unwrap().starts_with("0000: 41 42"));
    }

    #[test]
    fn missing_and_failed_resources_are_errors() {
        let (result, _) = run_cli(&["dump", "--type", "view", "9"]);
        assert!(result.unwrap_err().to_string().contains("not found"));

        let (result, _) = run_cli(&["dump", "--type", "text", "0"]);
        assert!(result.unwrap_err().to_string().contains("failed to load"));
    }
}
