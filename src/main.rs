use anyhow::Context;
use clap::Parser;
use ppi_common::InspectionRecord;
use ppi_report::{cli, config, error, export, form, io};
use cli::{Cli, Commands};
use config::Config;
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let config = Config::load().context("設定の読み込みに失敗しました")?;

    match cli.command {
        Commands::New { format, output_dir } => {
            println!("🚗 ppi - 購入前点検フォーム\n");
            let output_dir = prepare_output_dir(&config, output_dir)?;
            form::run_interactive(&config, format, &output_dir)?;
        }

        Commands::Generate { input, format, output_dir } => {
            println!("📄 ppi - 帳票生成\n");

            let output_dir = prepare_output_dir(&config, output_dir)?;
            let record = load_record(&input)
                .with_context(|| format!("入力を読み込めません: {}", input.display()))?;
            println!("✔ 入力を読み込み: {}", input.display());

            if record.client_name.trim().is_empty() {
                log::info!("client name is empty, file name falls back to \"client\"");
            }

            let generated_at = chrono::Local::now().naive_local();
            match export::export_record(&record, &config, format, &output_dir, generated_at) {
                Ok(paths) => println!("\n✅ 完了 ({}件)", paths.len()),
                Err(e) => {
                    eprintln!("\n✖ 保存に失敗しました: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Template { output } => {
            let form = ppi_common::InspectionForm::from_record(&InspectionRecord::new());
            let json = io::form_to_json(&form)?;
            match output {
                Some(path) => {
                    io::write_atomic(&path, json.as_bytes())?;
                    println!("✔ テンプレートを保存: {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Config {
            set_shop_name,
            set_shop_address,
            set_shop_phone,
            set_logo,
            set_reports_dir,
            show,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(name) = set_shop_name {
                config.shop.name = name;
                changed = true;
            }
            if let Some(address) = set_shop_address {
                config.shop.address = address;
                changed = true;
            }
            if let Some(phone) = set_shop_phone {
                config.shop.phone = phone;
                changed = true;
            }
            if let Some(logo) = set_logo {
                config.shop.logo_path = if logo.trim().is_empty() {
                    None
                } else {
                    Some(PathBuf::from(logo))
                };
                changed = true;
            }
            if let Some(dir) = set_reports_dir {
                config.reports_dir = dir;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  店舗名: {}", config.shop.name);
                println!("  住所: {}", config.shop.address);
                let phone = if config.shop.phone.is_empty() {
                    "-"
                } else {
                    config.shop.phone.as_str()
                };
                println!("  電話: {}", phone);
                println!(
                    "  ロゴ: {}",
                    config
                        .shop
                        .logo_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "なし".into())
                );
                println!("  出力先: {}", config.reports_dir.display());
            }
        }
    }

    Ok(())
}

/// 出力先を決めて作成（起動時に一度）
fn prepare_output_dir(config: &Config, output_dir: Option<PathBuf>) -> error::Result<PathBuf> {
    match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        }
        None => {
            config.ensure_reports_dir()?;
            Ok(config.reports_dir.clone())
        }
    }
}

/// JSONフォーム、または保存済みCSVから記録を読み込む
fn load_record(path: &Path) -> error::Result<InspectionRecord> {
    let is_csv = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        export::csv::load_csv(path)
    } else {
        let form = io::load_form(path)?;
        Ok(InspectionRecord::from_form(&form))
    }
}
