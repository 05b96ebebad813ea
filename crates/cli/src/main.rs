mod console;

use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use console::Console;
use pharma_core::automedication::{applicable_questions, QUESTION_BANK};
use pharma_core::interaction::{
    AnalysisReport, AnalysisSession, AnalysisState, HttpInteractionService, InteractionService,
};
use pharma_core::validation::normalize_substance_name;
use pharma_core::{CoreConfig, Drug, FlowVariant, PharmaError, SelectionStore, Wizard};

#[derive(Parser)]
#[command(name = "pharma")]
#[command(about = "Medication interaction and self-medication advisory CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search drugs by name, substance or CIS code
    Search {
        /// Search term
        term: String,
    },
    /// Manage the current drug selection
    Select {
        #[command(subcommand)]
        action: SelectAction,
    },
    /// Analyse interactions between the selected drugs
    Analyze,
    /// List the self-medication questions for a substance
    Questions {
        /// Substance name, e.g. paracétamol
        substance: String,
    },
    /// Run the interactive self-medication questionnaire
    Quiz {
        /// Substance to evaluate (asked interactively if omitted)
        substance: Option<String>,
        /// Entry flow
        #[arg(long, value_enum, default_value_t = Variant::Molecule)]
        variant: Variant,
    },
}

#[derive(Subcommand)]
enum SelectAction {
    /// Add a drug found by CIS code or search term
    Add {
        /// CIS code or search term matching exactly one drug
        query: String,
    },
    /// Remove a drug by CIS code
    Remove {
        /// CIS code
        cis: String,
    },
    /// Show the selection
    List,
    /// Empty the selection
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
enum Variant {
    /// Profile form first, then substance
    Profile,
    /// Substance first
    Molecule,
    /// Substance picked among the selected drugs
    Selection,
}

impl From<Variant> for FlowVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Profile => FlowVariant::ProfileFirst,
            Variant::Molecule => FlowVariant::MoleculeSearchFirst,
            Variant::Selection => FlowVariant::SelectionListFirst,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pharma_core=warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = CoreConfig::from_env()?;
    tracing::debug!(api = cfg.api_base_url(), "configuration loaded");

    match cli.command {
        Some(Commands::Search { term }) => {
            let service = HttpInteractionService::new(&cfg)?;
            let drugs = service.search(&term);
            if drugs.is_empty() {
                println!("Aucun médicament trouvé.");
            } else {
                for drug in &drugs {
                    print_drug(drug);
                }
            }
        }
        Some(Commands::Select { action }) => {
            let mut store = SelectionStore::load(cfg.selection_file())?;
            match action {
                SelectAction::Add { query } => {
                    let service = HttpInteractionService::new(&cfg)?;
                    let hits = service.search(&query);
                    let chosen = hits
                        .iter()
                        .find(|d| d.cis == query.trim())
                        .or_else(|| if hits.len() == 1 { hits.first() } else { None });

                    match chosen {
                        Some(drug) => {
                            if store.add(drug.clone()) {
                                store.save(cfg.selection_file())?;
                                println!("Ajouté : {}", drug.nom);
                            } else {
                                println!("Déjà sélectionné : {}", drug.nom);
                            }
                        }
                        None if hits.is_empty() => println!("Aucun médicament trouvé."),
                        None => {
                            println!("Plusieurs médicaments correspondent, précisez le code CIS :");
                            for drug in &hits {
                                print_drug(drug);
                            }
                        }
                    }
                }
                SelectAction::Remove { cis } => match store.remove(&cis) {
                    Some(drug) => {
                        store.save(cfg.selection_file())?;
                        println!("Retiré : {}", drug.nom);
                    }
                    None => println!("Aucun médicament avec le code CIS {cis}."),
                },
                SelectAction::List => {
                    if store.is_empty() {
                        println!("Aucun médicament sélectionné.");
                    }
                    for drug in store.drugs() {
                        print_drug(drug);
                    }
                }
                SelectAction::Clear => {
                    store.clear();
                    store.save(cfg.selection_file())?;
                    println!("Sélection vidée.");
                }
            }
        }
        Some(Commands::Analyze) => {
            let store = SelectionStore::load(cfg.selection_file())?;
            let service = HttpInteractionService::new(&cfg)?;
            let mut session = AnalysisSession::new();

            match session.run(&store, &service) {
                Ok(AnalysisState::Ready(report)) => print_report(report),
                Ok(AnalysisState::Failed(message)) => eprintln!("{message}"),
                Ok(_) => {}
                Err(PharmaError::NotEnoughDrugs { required, selected }) => {
                    println!(
                        "Sélectionnez au moins {required} médicaments pour lancer l'analyse ({selected} sélectionné(s))."
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
        Some(Commands::Questions { substance }) => {
            let id = normalize_substance_name(&substance);
            let questions = applicable_questions(&id, QUESTION_BANK);
            if questions.is_empty() {
                println!("Pas de questions spécifiques pour {substance}.");
            }
            for (i, question) in questions.iter().enumerate() {
                println!(
                    "{}. {} (si oui : {})",
                    i + 1,
                    question.text,
                    question.risk_level
                );
            }
        }
        Some(Commands::Quiz { substance, variant }) => {
            let wizard = match FlowVariant::from(variant) {
                FlowVariant::SelectionListFirst => {
                    let store = SelectionStore::load(cfg.selection_file())?;
                    if store.is_empty() {
                        println!("Aucun médicament sélectionné.");
                        return Ok(());
                    }
                    println!("Substances de votre sélection :");
                    for drug in store.drugs() {
                        for s in &drug.substances {
                            println!("  {} ({})", s.nom, drug.nom);
                        }
                    }
                    Wizard::from_selection(&store)
                }
                other => Wizard::new(other),
            };

            let stdin = std::io::stdin();
            let mut console = Console::new(stdin.lock(), std::io::stdout());
            console.run_wizard(wizard, substance)?;
        }
        None => {
            println!("Use 'pharma --help' for commands");
        }
    }

    Ok(())
}

fn print_drug(drug: &Drug) {
    let substances: Vec<&str> = drug.substances.iter().map(|s| s.nom.as_str()).collect();
    if substances.is_empty() {
        println!("{}  {}", drug.cis, drug.nom);
    } else {
        println!("{}  {} [{}]", drug.cis, drug.nom, substances.join(", "));
    }
}

fn print_report(report: &AnalysisReport) {
    let severity = report
        .global_severity
        .map(|s| s.as_str())
        .unwrap_or("Neutre");
    println!("Analyse : Niveau {severity}");
    println!();
    println!("L'avis de l'expert");
    println!("{}", report.explanation);
    println!();
    println!("Conduite à tenir");
    println!("{}", report.conduct_to_follow);

    if !report.technical_details.is_empty() {
        println!();
        println!("Détails techniques");
        for detail in &report.technical_details {
            println!(
                "- [{}] {} + {} : {}",
                detail.level_label(),
                detail.molecule_a,
                detail.molecule_b,
                detail.risk
            );
            if let Some(management) = &detail.management {
                println!("  Conseil : {management}");
            }
        }
    }
}
