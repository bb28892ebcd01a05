mod presets;

use std::path::PathBuf;
use std::process::exit;

use chrono::Local;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::{error, info};
use url::Url;

use db::{bblx, Concordance};
use usfm::{book, intro, usx, Excision, IntroConfig, UsxConfig, Usfmconv};

#[derive(Parser, Debug)]
#[command(author, version, about = "Conversion tools for Garth's Hyper-literal Translation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export the English and Greek texts as one USFM file per book
    ExportUsfm {
        /// Path to the concordance database
        #[arg(value_name = "DB_PATH", env = "GHT_DB_PATH")]
        db_path: String,

        /// Directory the `ght_usfm` and `ghtg_usfm` folders are written to
        #[arg(long, env = "GHT_OUT_DIR", default_value = ".")]
        out_dir: PathBuf,
    },

    /// Export the Greek and English texts as eSword modules
    ExportBblx {
        /// Path to the concordance database
        #[arg(value_name = "DB_PATH", env = "GHT_DB_PATH", default_value = "../concordance.db")]
        db_path: String,

        /// Directory the `.bblx` files are written to
        #[arg(long, env = "GHT_OUT_DIR", default_value = ".")]
        out_dir: PathBuf,
    },

    /// Convert the exported USFM folders to USX
    ConvertUsx {
        /// The usfmconv executable
        #[arg(
            long,
            env = "GHT_USFMCONV",
            default_value = "/home/nathan/Documents/GHT/toUSFM/.usfmtc/venv/bin/usfmconv"
        )]
        converter: PathBuf,

        /// Directory holding the USFM folders
        #[arg(long, env = "GHT_USFM_ROOT", default_value = "/home/nathan/Documents/GHT/toUSFM")]
        root: PathBuf,

        /// USFM folders to convert
        #[arg(
            long = "folder",
            env = "GHT_USFM_FOLDERS",
            value_delimiter = ',',
            default_values_t = ["ght_usfm".to_string(), "ghtg_usfm".to_string()]
        )]
        folders: Vec<String>,

        /// Directory the USX folders are created in
        #[arg(long, env = "GHT_OUT_DIR", default_value = ".")]
        out_dir: PathBuf,
    },

    /// Convert the online introduction to a USFM introduction book
    IntroUsfm {
        /// Page holding the introduction
        #[arg(long, env = "GHT_INTRO_URL", default_value = "https://www.wiebefamily.org/GHT.htm")]
        url: Url,

        /// Id of the element holding the introduction
        #[arg(long, env = "GHT_INTRO_ID", default_value = intro::CONTAINER_ID)]
        container_id: String,

        /// Output folder
        #[arg(long, env = "GHT_INTRO_DIR", default_value = "ght_usfm")]
        out_dir: PathBuf,

        /// Output file name
        #[arg(long, env = "GHT_INTRO_FILE", default_value = "A7INT.usfm")]
        file_name: String,

        /// Keep the repeated block the page carries
        #[arg(long)]
        keep_duplicate: bool,
    },
}

fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match usage_status(&e) {
            0 => e.exit(),
            status => {
                eprintln!("{}", e);
                exit(status);
            }
        },
    };

    if let Err(e) = run(cli.command) {
        error!("{}", e);
        exit(1);
    }
}

/// Exit status for a command line that does not parse. Help and version
/// requests succeed; usage errors exit with 1.
fn usage_status(e: &clap::Error) -> i32 {
    if e.use_stderr() {
        1
    } else {
        0
    }
}

fn run(command: Commands) -> Result<(), usfm::Error> {
    match command {
        Commands::ExportUsfm { db_path, out_dir } => {
            let mut concordance = Concordance::open(&db_path)?;
            for export in presets::usfm_exports(&out_dir) {
                book::export(&mut concordance, &export)?;
            }
            info!("USFM export complete");
        }
        Commands::ExportBblx { db_path, out_dir } => {
            let mut concordance = Concordance::open(&db_path)?;
            let today = Local::now().date_naive();
            for export in presets::bblx_exports(&out_dir) {
                bblx::export(&mut concordance, &export, today)?;
            }
        }
        Commands::ConvertUsx {
            converter,
            root,
            folders,
            out_dir,
        } => {
            let config = UsxConfig {
                root,
                folders,
                out_root: out_dir,
            };
            usx::run(&config, &Usfmconv { program: converter })?;
        }
        Commands::IntroUsfm {
            url,
            container_id,
            out_dir,
            file_name,
            keep_duplicate,
        } => {
            let config = IntroConfig {
                url,
                container_id,
                excision: if keep_duplicate {
                    None
                } else {
                    Some(Excision::default())
                },
                out_dir,
                file_name,
            };
            intro::run(&config)?;
        }
    }

    Ok(())
}
