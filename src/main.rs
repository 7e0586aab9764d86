use clap::Parser;
use color_eyre::Result;
use goldie_hub::{
    Config, Hub, Profile,
    cli::{self, Cli, Commands},
    logging,
    tracker::{ApartmentDraft, MilestoneDraft},
};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path, profile)?,
        None => Config::load_with_profile(profile)?,
    };

    // Logging is best effort; the tracker still works without it
    let _logger = match logging::init_logging(&config.log_level, &config.get_log_dir()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("WARNING: logging disabled: {}", e);
            None
        }
    };

    let hub = Hub::open(config.get_database_path())?;

    match cli.command.unwrap_or(Commands::Overview) {
        Commands::Overview => cli::handle_overview(&hub)?,
        Commands::List {
            collection,
            sort,
            json,
        } => cli::handle_list(&hub, collection, sort, json)?,
        Commands::AddApartment {
            title,
            price,
            specs,
            img,
            pet_tag,
            description,
        } => {
            let draft = ApartmentDraft {
                title,
                price,
                specs,
                img,
                pet_tag,
                description,
            };
            cli::handle_add_apartment(&hub, draft)?
        }
        Commands::Status { id, status } => cli::handle_status(&hub, id, status)?,
        Commands::Schedule { id, info } => cli::handle_schedule(&hub, id, info)?,
        Commands::Note { id, text } => cli::handle_note(&hub, id, text)?,
        Commands::Log { kind, label, photo } => cli::handle_log(&hub, kind, label, photo)?,
        Commands::AddMilestone {
            focus,
            status,
            progress,
            icon,
            color,
            what,
            how,
        } => {
            let draft = MilestoneDraft {
                focus_area: focus,
                status,
                recent_progress: progress,
                icon,
                color,
                what_to_work_on: what,
                how_to_work_on: how,
            };
            cli::handle_add_milestone(&hub, draft)?
        }
        Commands::AddPhoto { path, caption } => cli::handle_add_photo(&hub, path, caption)?,
        Commands::AddChecklist { title, content } => {
            cli::handle_add_checklist(&hub, title, content)?
        }
        Commands::Toggle { id } => cli::handle_toggle(&hub, id)?,
        Commands::Update {
            collection,
            id,
            patch,
        } => cli::handle_update(&hub, collection, id, patch)?,
        Commands::Remove { collection, id } => cli::handle_remove(&hub, collection, id)?,
        Commands::Stats => cli::handle_stats(&hub)?,
        Commands::Insights { hour, dismiss } => cli::handle_insights(&hub, &config, hour, dismiss)?,
        Commands::AuthCheck { path, header } => {
            cli::handle_auth_check(&config.auth_gate(), &path, header.as_deref())
        }
    }

    Ok(())
}
