use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use ldct_survey::scoring::{Language, SurveyForm};
use ldct_survey::service::{ClaimRequest, OutcomeClass, SurveyService};
use ldct_survey::store::{CsvFileBackend, RecordBackend};

// Exit codes, one per outcome class
const EXIT_SUCCESS: i32 = 0;
const EXIT_VALIDATION: i32 = 1;
const EXIT_NOT_FOUND: i32 = 2;
const EXIT_STORAGE: i32 = 3;
const EXIT_CONFIG: i32 = 4;

/// Raw answers, one flag per scored question. Values are coerced like
/// web form fields: blank or non-numeric means 0.
#[derive(Args, Debug, Default)]
struct AnswerArgs {
    #[arg(long)]
    smoking: Option<String>,
    #[arg(long)]
    years_smoking: Option<String>,
    #[arg(long)]
    secondhand_smoke: Option<String>,
    #[arg(long)]
    pm25: Option<String>,
    #[arg(long)]
    chronic_cough: Option<String>,
    #[arg(long)]
    shortness_of_breath: Option<String>,
    #[arg(long)]
    wheezing: Option<String>,
    #[arg(long)]
    lung_disease_history: Option<String>,
    #[arg(long)]
    family_cancer_history: Option<String>,
}

impl AnswerArgs {
    fn into_form(self, lang: Option<String>) -> SurveyForm {
        let fields = [
            ("smoking", self.smoking),
            ("years_smoking", self.years_smoking),
            ("secondhand_smoke", self.secondhand_smoke),
            ("pm25", self.pm25),
            ("chronic_cough", self.chronic_cough),
            ("shortness_of_breath", self.shortness_of_breath),
            ("wheezing", self.wheezing),
            ("lung_disease_history", self.lung_disease_history),
            ("family_cancer_history", self.family_cancer_history),
            ("lang", lang),
        ];
        SurveyForm::from_pairs(
            fields
                .into_iter()
                .filter_map(|(k, v)| v.map(|v| (k, v))),
        )
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the data file with its header if it does not exist
    Init,
    /// Score a set of answers and store the result
    Submit {
        /// Language of the result texts (th or en)
        #[arg(long)]
        lang: Option<String>,

        #[command(flatten)]
        answers: AnswerArgs,
    },
    /// Answer the survey interactively, then store the result
    Take {
        /// Language of the result texts (th or en)
        #[arg(long)]
        lang: Option<String>,
    },
    /// Attach contact details to an earlier submission
    Claim {
        /// Token printed when the survey was submitted
        #[arg(long)]
        token: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        lang: Option<String>,
    },
    /// Write the whole data file, unchanged
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "ldct")]
#[command(about = "Lung cancer risk survey", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/ldct/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the data file (overrides the config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn exit_code(class: OutcomeClass) -> i32 {
    match class {
        OutcomeClass::Success => EXIT_SUCCESS,
        OutcomeClass::Validation => EXIT_VALIDATION,
        OutcomeClass::NotFound => EXIT_NOT_FOUND,
        OutcomeClass::ServerFault => EXIT_STORAGE,
    }
}

fn print_json<T: serde::Serialize, W: Write>(out: &mut W, value: &T) -> i32 {
    let written = serde_json::to_string_pretty(value)
        .map_err(|e| e.to_string())
        .and_then(|json| writeln!(out, "{}", json).map_err(|e| e.to_string()));
    match written {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Failed to write output: {}", e);
            EXIT_STORAGE
        }
    }
}

fn submit<B: RecordBackend, W: Write>(
    service: &SurveyService<B>,
    form: &SurveyForm,
    json: bool,
    out: &mut W,
) -> i32 {
    match service.submit(form) {
        Ok(result) => {
            if json {
                return print_json(out, &result);
            }
            let use_colors = ldct_survey::output::should_use_colors();
            match writeln!(out, "{}", ldct_survey::output::format_submission(&result, use_colors)) {
                Ok(()) => EXIT_SUCCESS,
                Err(e) => {
                    eprintln!("Failed to write result: {}", e);
                    EXIT_STORAGE
                }
            }
        }
        Err(e) => {
            log::error!("Submission failed: {}", e);
            eprintln!("Failed to store submission: {}", e);
            EXIT_STORAGE
        }
    }
}

/// Interactive submission. `out` receives only the result, so with `json`
/// it holds a single JSON document and prompts must go elsewhere.
fn take<B: RecordBackend, R: BufRead, P: Write, W: Write>(
    service: &SurveyService<B>,
    language: Language,
    json: bool,
    input: &mut R,
    prompts: &mut P,
    out: &mut W,
) -> i32 {
    match ldct_survey::prompt::run_questionnaire(input, prompts, language) {
        Ok(form) => {
            if !json {
                let _ = writeln!(prompts);
            }
            submit(service, &form, json, out)
        }
        Err(e) => {
            eprintln!("Questionnaire aborted: {:#}", e);
            EXIT_VALIDATION
        }
    }
}

/// Copy the data file to `output`, or to `out` when no path is given.
/// Any storage failure, a missing file included, is a storage fault.
fn export<B: RecordBackend, W: Write>(
    service: &SurveyService<B>,
    output: Option<&Path>,
    out: &mut W,
) -> i32 {
    let bytes = match service.export() {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Export failed: {}", e);
            return exit_code(OutcomeClass::ServerFault);
        }
    };

    let written = match output {
        Some(path) => std::fs::write(path, &bytes),
        None => out.write_all(&bytes),
    };
    match written {
        Ok(()) => {
            if let Some(path) = output {
                log::info!("Exported {} bytes to {}", bytes.len(), path.display());
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to write export: {}", e);
            EXIT_STORAGE
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match ldct_survey::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate the text table at startup
    let localization = match config.localization() {
        Ok(l) => l,
        Err(errors) => {
            eprintln!("Translation config errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    };

    let data_path = cli.data.unwrap_or_else(|| config.data_path());
    log::debug!("Using data file {}", data_path.display());

    let service = SurveyService::new(
        CsvFileBackend::new(&data_path),
        localization,
        config.language(),
    );

    if let Err(e) = service.initialize() {
        eprintln!("Failed to initialize data file: {}", e);
        std::process::exit(EXIT_STORAGE);
    }

    let code = match cli.command {
        Commands::Init => {
            if !cli.json {
                println!("Data file ready at {}", data_path.display());
            }
            EXIT_SUCCESS
        }
        Commands::Submit { lang, answers } => {
            submit(&service, &answers.into_form(lang), cli.json, &mut std::io::stdout())
        }
        Commands::Take { lang } => {
            let language = Language::parse_or(lang.as_deref(), service.default_language());
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut prompts: Box<dyn Write> = if cli.json {
                Box::new(std::io::stderr())
            } else {
                Box::new(std::io::stdout())
            };
            take(
                &service,
                language,
                cli.json,
                &mut input,
                &mut prompts,
                &mut std::io::stdout(),
            )
        }
        Commands::Claim {
            token,
            name,
            email,
            lang,
        } => {
            let outcome = service.claim(&ClaimRequest {
                token,
                name,
                email,
                language: lang,
            });
            if cli.json {
                print_json(&mut std::io::stdout(), &outcome.response());
            } else if outcome.is_success() {
                let use_colors = ldct_survey::output::should_use_colors();
                println!("{}", ldct_survey::output::format_claim(&outcome, use_colors));
            } else {
                let use_colors = std::io::IsTerminal::is_terminal(&std::io::stderr());
                eprintln!("{}", ldct_survey::output::format_claim(&outcome, use_colors));
            }
            exit_code(outcome.class())
        }
        Commands::Export { output } => {
            export(&service, output.as_deref(), &mut std::io::stdout())
        }
    };

    std::process::exit(code);
}
