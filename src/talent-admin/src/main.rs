//! Talent Admin CLI — inspect the module catalog, resolve module components,
//! and preview how a tenant's modules mount in the superadmin console.

use clap::{Parser, Subcommand};
use std::sync::Arc;
use talent_admin_console::{builtin_registry, ModuleShell, TenantModuleManager};
use talent_core::{AppConfig, ModuleId};
use talent_module_registry::naming::{
    display_name, known_modules, normalize_module_name, technical_name,
};
use talent_module_registry::{CandidateLayout, ModuleComponentResolver};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "talent-admin")]
#[command(about = "Talent platform superadmin module tooling")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, env = "TALENT_CONSOLE_CONFIG")]
    config: Option<String>,

    /// Human-readable logs instead of JSON
    #[arg(long, default_value_t = false)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Module catalog and component resolution
    Modules {
        #[command(subcommand)]
        action: ModulesAction,
    },
}

#[derive(Subcommand)]
enum ModulesAction {
    /// List known modules with their display names
    List,

    /// Resolve a module id to its UI component and show where it came from
    Resolve {
        /// Module id, e.g. people or ats_core
        id: String,
    },

    /// Show the technical and display forms of a module name
    Normalize {
        /// Technical or display name
        name: String,
    },

    /// Mount a module for a tenant and print the rendered view
    Mount {
        /// Tenant UUID (auto-generated if omitted)
        #[arg(long)]
        tenant: Option<Uuid>,

        /// Comma-separated modules to enable first (defaults to the mounted one)
        #[arg(long, value_delimiter = ',')]
        enable: Vec<String>,

        /// Module id to mount
        id: String,
    },
}

const DEFAULT_LOG_FILTER: &str =
    "talent_admin=info,talent_module_registry=info,talent_admin_console=info";

/// Actor recorded in the tenant change log for CLI-driven changes.
const CLI_ACTOR: &str = "talent-admin";

fn init_tracing(pretty: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if pretty {
        builder.init();
    } else {
        builder.json().init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.pretty);

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        }
    };
    info!(
        platform = %config.platform_name,
        absolute_base = %config.modules.absolute_base,
        relative_base = %config.modules.relative_base,
        "Configuration loaded"
    );

    let registry = builtin_registry(&config.modules)?;
    let layout = CandidateLayout::from_config(&config.modules);
    let resolver = Arc::new(ModuleComponentResolver::new(registry, layout));
    if !config.modules.preload.is_empty() {
        resolver.preload(&config.modules.preload).await;
    }
    let shell = ModuleShell::new(resolver, Arc::new(TenantModuleManager::new()));

    match cli.command {
        Commands::Modules { action } => match action {
            ModulesAction::List => cmd_list(),
            ModulesAction::Resolve { id } => cmd_resolve(&shell, &id).await?,
            ModulesAction::Normalize { name } => cmd_normalize(&name),
            ModulesAction::Mount { tenant, enable, id } => {
                cmd_mount(&shell, tenant, enable, &id).await?
            }
        },
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Module commands
// ---------------------------------------------------------------------------

fn cmd_list() {
    println!("{:<28} DISPLAY NAME", "MODULE");
    println!("{}", "-".repeat(56));
    for (technical, display) in known_modules() {
        println!("{technical:<28} {display}");
    }
}

async fn cmd_resolve(shell: &ModuleShell, raw: &str) -> anyhow::Result<()> {
    let module_id = ModuleId::new(normalize_module_name(raw))?;
    match shell.resolver().resolve(&module_id).await {
        Some(component) => {
            println!("Module:    {module_id}");
            println!("Name:      {}", display_name(module_id.as_str()));
            println!("Component: {}", component.name());
        }
        None => {
            println!("Module '{module_id}' has no UI component");
            println!("Tried:");
            for candidate in shell.resolver().layout().candidates(&module_id) {
                println!("  {candidate}");
            }
        }
    }
    Ok(())
}

fn cmd_normalize(name: &str) {
    println!("Normalized: {}", normalize_module_name(name));
    println!("Technical:  {}", technical_name(name));
    println!("Display:    {}", display_name(name));
}

async fn cmd_mount(
    shell: &ModuleShell,
    tenant: Option<Uuid>,
    enable: Vec<String>,
    raw: &str,
) -> anyhow::Result<()> {
    let tenant_id = tenant.unwrap_or_else(Uuid::new_v4);
    let module_id = ModuleId::new(normalize_module_name(raw))?;

    let access = shell.access();
    if enable.is_empty() {
        access.enable_module(tenant_id, module_id.clone(), CLI_ACTOR);
    }
    for name in &enable {
        access.enable_by_name(tenant_id, name, CLI_ACTOR)?;
    }

    let view = shell.mount(tenant_id, None, &module_id).await;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
