use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "tr-docs")]
#[command(
    version,
    about = "Download Trade Republic docs, generate CSV for importing into Portfolio Performance and upload docs to Nextcloud"
)]
#[command(
    long_about = "Runs a four stage pipeline: delete the previous local download folder, download \
transaction documents from Trade Republic via pytr, generate a Portfolio Performance import CSV \
from the downloaded event data, and upload all files to a Nextcloud folder. Credentials and paths \
are read from the environment (a .env file in the working directory is loaded first)."
)]
pub struct Cli {
    /// Skip document download from Trade Republic
    #[arg(long = "nodl", visible_alias = "skip-doc-download")]
    pub nodl: bool,

    /// Skip deletion of existing local download folder
    #[arg(long = "skipdel", visible_alias = "skip-dl-folder-deletion")]
    pub skipdel: bool,

    /// Skip generation of CSV for import into Portfolio Performance
    #[arg(long = "nocsv", visible_alias = "skip-csv-generation")]
    pub nocsv: bool,

    /// Skip folder creation in and upload of files to Nextcloud
    #[arg(long = "noupload", visible_alias = "skip-nextcloud-upload")]
    pub noupload: bool,

    /// Force folder creation in Nextcloud even if the target folder exists
    #[arg(long = "ffc", visible_alias = "force-nc-folder-create")]
    pub ffc: bool,

    /// Disable colorized/ANSI output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_run_every_stage() {
        let cli = Cli::try_parse_from(["tr-docs"]).unwrap();
        assert!(!cli.nodl);
        assert!(!cli.skipdel);
        assert!(!cli.nocsv);
        assert!(!cli.noupload);
        assert!(!cli.ffc);
    }

    #[test]
    fn test_short_flag_forms() {
        let cli =
            Cli::try_parse_from(["tr-docs", "--nodl", "--skipdel", "--nocsv", "--noupload"])
                .unwrap();
        assert!(cli.nodl);
        assert!(cli.skipdel);
        assert!(cli.nocsv);
        assert!(cli.noupload);
    }

    #[test]
    fn test_long_aliases_parse() {
        let cli = Cli::try_parse_from([
            "tr-docs",
            "--skip-doc-download",
            "--skip-dl-folder-deletion",
            "--skip-csv-generation",
            "--skip-nextcloud-upload",
            "--force-nc-folder-create",
        ])
        .unwrap();
        assert!(cli.nodl);
        assert!(cli.skipdel);
        assert!(cli.nocsv);
        assert!(cli.noupload);
        assert!(cli.ffc);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["tr-docs", "--frobnicate"]).is_err());
    }
}
