use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use suivi_candidatures::app::{Action, AppController, Effect};
use suivi_candidatures::cli::{Cli, Commands, DraftArgs};
use suivi_candidatures::config::Config;
use suivi_candidatures::export::map_html;
use suivi_candidatures::prompt;
use suivi_candidatures::repository::{LoadReport, LoadSource, Repository};
use suivi_candidatures::store::{FileStore, StoreAdapter};
use suivi_candidatures_common::{format_date_short, marker_color, RecordDraft};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("❌ {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn open_store(config: &Config, data_dir: Option<&Path>) -> StoreAdapter {
    match config.resolve_data_dir(data_dir) {
        Some(dir) => StoreAdapter::new(Box::new(FileStore::new(dir)), config.storage_key.clone()),
        None => StoreAdapter::memory_only(config.storage_key.clone()),
    }
}

fn report_load(report: &LoadReport) {
    match report.source {
        LoadSource::Stored => {}
        LoadSource::Seeded => println!("✔ Données initiales créées ({} candidatures)", report.count),
        LoadSource::SeededInMemory => {
            println!("⚠ Stockage indisponible : les modifications restent en mémoire")
        }
        LoadSource::Fallback => eprintln!(
            "⚠ Données enregistrées illisibles ({}), données de secours utilisées",
            report.error.as_deref().unwrap_or("?")
        ),
    }
}

fn print_status(app: &AppController, now: Instant) {
    if let Some(message) = app.status(now) {
        println!("{}", message);
    }
}

fn print_list(app: &AppController) {
    if app.view().is_empty() {
        println!("Aucune candidature trouvée");
        return;
    }
    println!(
        "{:>3}  {:<8}  {:<24} {:<9} {:<16} {:<18} {:<11} {:<11} {}",
        "#", "ID", "Restaurant", "Date", "Téléphone", "Chef", "Visite", "Réponse", "Commentaires"
    );
    for record in app.view() {
        let position = app
            .repository()
            .position_of(record.id)
            .map(|p| p + 1)
            .unwrap_or(0);
        println!(
            "{:>3}  {:<8}  {:<24} {:<9} {:<16} {:<18} {:<11} {:<11} {}",
            position,
            record.id.short(),
            record.restaurant,
            format_date_short(&record.date_envoi),
            or_dash(&record.telephone),
            or_dash(&record.chef),
            record.visite.label(),
            record.reponse.label(),
            or_dash(&record.commentaires),
        );
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// フォームを開いた後の入力と保存
fn fill_and_save(
    app: &mut AppController,
    champs: &DraftArgs,
    interactif: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let mut draft = app
        .form()
        .draft()
        .cloned()
        .unwrap_or_else(RecordDraft::blank);
    champs.apply_to(&mut draft);
    if interactif {
        prompt::edit_draft(&mut draft)?;
    }

    let now = Instant::now();
    app.dispatch(Action::UpdateDraft(draft), now)?;
    let effect = app.dispatch(Action::SaveForm, now)?;
    print_status(app, now);
    if let Effect::Saved(outcome) = effect {
        println!("  id: {}", outcome.id);
    }
    app.dispatch(Action::Tick, now + config.timings().save_confirm)?;
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load().context("chargement de la configuration")?;

    let store = open_store(&config, cli.data_dir.as_deref());
    let (repo, report) = Repository::initialize(store, config.max_records);
    report_load(&report);
    let mut app = AppController::new(repo, config.timings());

    match cli.command {
        Commands::Liste { recherche, tri } => {
            let now = Instant::now();
            for key in tri {
                app.dispatch(Action::SortBy(key), now)?;
            }
            if let Some(term) = recherche {
                app.dispatch(Action::Search(term), now)?;
            }
            print_list(&app);
            println!("\n{} / {} candidatures", app.view().len(), app.records().len());
        }

        Commands::Ajouter { champs, interactif } => {
            app.dispatch(Action::OpenCreate, Instant::now())?;
            fill_and_save(&mut app, &champs, interactif, &config)?;
        }

        Commands::Modifier { cible, champs, interactif } => {
            let index = app.resolve_target(&cible)?;
            app.dispatch(Action::OpenEdit(index), Instant::now())?;
            fill_and_save(&mut app, &champs, interactif, &config)?;
        }

        Commands::Supprimer { cible, oui } => {
            let index = app.resolve_target(&cible)?;
            let id = app.records()[index].id;
            let now = Instant::now();
            app.dispatch(Action::RequestDelete(id), now)?;

            let name = app
                .pending_delete()
                .map(|r| r.restaurant.clone())
                .unwrap_or_default();
            if oui || prompt::confirm_delete(&name)? {
                app.dispatch(Action::ConfirmDelete, now)?;
                print_status(&app, now);
            } else {
                app.dispatch(Action::DismissDelete, now)?;
                println!("Suppression annulée");
            }
        }

        Commands::Carte { cible, html } => {
            let now = Instant::now();
            if let Some(cible) = cible {
                let index = app.resolve_target(&cible)?;
                match app.dispatch(Action::SelectFromList(index), now)? {
                    Effect::FlyTo(fly) => println!(
                        "📍 {} : {}, {} (zoom {})\n",
                        app.records()[index].restaurant,
                        fly.center.lat,
                        fly.center.lng,
                        fly.zoom
                    ),
                    _ => println!(
                        "⚠ {} n'a pas de coordonnées\n",
                        app.records()[index].restaurant
                    ),
                }
            }

            let markers = app.map().markers(app.records());
            println!("Liste ({})", app.records().len());
            for record in app.records() {
                let active = app.map().selected() == Some(record.id);
                let color = marker_color(record);
                let position = match record.location() {
                    Some(p) => format!("{}, {}", p.lat, p.lng),
                    None => "sans coordonnées".to_string(),
                };
                println!(
                    "{} {} {:<24} {:<11} {}",
                    if active { "▶" } else { " " },
                    color.hex(),
                    record.restaurant,
                    color.status_label(),
                    position
                );
            }
            println!("\n{} marqueurs sur la carte", markers.len());

            if let Some(path) = html {
                map_html::write_map_page(app.records(), app.map(), &path)?;
                println!("✔ Carte: {}", path.display());
            }
        }

        Commands::Stats => {
            let stats = app.stats();
            println!("Candidatures : {}", stats.total);
            println!("Visites      : {}", stats.visites);
            println!("Réponses     : {}", stats.reponses);
            println!("Taux réponse : {}%", stats.taux);
        }

        Commands::Exporter { format, sortie } => {
            let output = sortie.unwrap_or_else(|| PathBuf::from("."));
            let today = chrono::Local::now().date_naive();
            let now = Instant::now();
            let paths = app.export(&format, &output, today, now)?;
            for path in paths {
                println!("✔ {}", path.display());
            }
            print_status(&app, now);
        }

        Commands::Config { set_data_dir, show } => {
            let mut config = config;

            if let Some(dir) = set_data_dir {
                config.set_data_dir(dir)?;
                println!("✔ Répertoire de données enregistré");
            }

            if show {
                println!("Configuration:");
                println!("  Clé de stockage : {}", config.storage_key);
                println!("  Maximum         : {}", config.max_records);
                match config.resolve_data_dir(cli.data_dir.as_deref()) {
                    Some(dir) => println!("  Données         : {}", dir.display()),
                    None => println!("  Données         : mémoire uniquement"),
                }
                println!(
                    "  Stockage        : {}",
                    if app.repository().is_durable() { "disponible" } else { "indisponible" }
                );
            }
        }
    }

    Ok(())
}
