use anyhow::Context;
use clap::Parser;
use construction_dashboard::{
    cli::{Cli, Commands},
    config::resolve_config,
    dashboard::load_view,
    logging::{LogTarget, init_logging},
    models::{company::Company, selection::Selection},
    providers::yahoo_chart::YahooChartProvider,
    report::render_text,
    ui,
};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_target = match cli.command {
        Commands::Tui => LogTarget::default_file(),
        _ => LogTarget::Stderr,
    };
    init_logging(&log_target)?;

    let config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Companies => {
            for company in Company::ALL {
                println!("{:<12}{}", company.name(), company.symbol());
            }
        }

        Commands::Show {
            company,
            period,
            json,
        } => {
            let provider = YahooChartProvider::new(&config.provider)?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?;

            let selection = Selection::new(company, period);
            let view = runtime.block_on(load_view(&provider, selection, &config.display));
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render_text(&view, &config.display));
            }
        }

        Commands::Tui => {
            let provider = YahooChartProvider::new(&config.provider)?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?;

            info!(base_url = provider.base_url(), "starting dashboard");
            ui::run(&runtime, &provider, &config)?;
        }
    }

    Ok(())
}
