use anyhow::{bail, Context};
use catalog_common::error::join_columns;
use catalog_common::{distinct_categories, distinct_materials, DiffReport, Label, Lang, Record};
use catalog_upsert::{cli, config, error, export, store, upsert};
use clap::Parser;
use cli::{Cli, Commands, FilterArgs};
use config::Config;
use dialoguer::Confirm;
use error::CatalogError;
use std::path::{Path, PathBuf};
use store::RecordStore;
use upsert::{UpsertOptions, UpsertPreview};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = Config::load().context("設定ファイルを読み込めません")?;
    let lang = cli.lang.unwrap_or(config.lang);
    let master_path = cli.master.clone().unwrap_or_else(|| config.master_path.clone());
    let store = RecordStore::new(&master_path);

    match cli.command {
        Commands::List { filter } => {
            let records = load_master(&store, lang);
            let report = load_report(&filter)?;
            let shown = filter.to_filter().apply(&records, report.as_ref());

            if cli.verbose {
                println!("{}: {}", lang.text(Label::Category), distinct_categories(&records).join(", "));
                println!("{}: {}", lang.text(Label::Material), distinct_materials(&records).join(", "));
            }
            println!("{}\n", lang.list_header(shown.len()));
            for record in &shown {
                print_card(record, lang, report.as_ref());
            }
        }

        Commands::Export { output, format, pdf_quality, font, filter } => {
            println!("📄 產品型錄 - エクスポート\n");

            let records = load_master(&store, lang);
            let report = load_report(&filter)?;
            let shown = filter.to_filter().apply(&records, report.as_ref());
            println!("✔ {}", lang.list_header(shown.len()));

            let options = export::pdf::PdfOptions {
                lang,
                quality: pdf_quality.unwrap_or(config.pdf_quality),
                font_path: font.or_else(|| config.font_path.clone()),
                base_dir: master_dir(&master_path),
                show_progress: true,
            };
            let output = output.unwrap_or_else(|| PathBuf::from("."));
            export::export_records(&shown, &format, &output, &options)
                .context("エクスポートに失敗しました")?;

            println!("\n✅ エクスポート完了");
        }

        Commands::Diff { incoming, report } => {
            println!("🔍 差分プレビュー\n");

            let preview = load_preview(&store, &incoming, lang)?;
            print_preview(&preview, lang);
            save_report(&preview.report, report.as_deref())?;
        }

        Commands::Apply { incoming, yes, report, backup_on_noop } => {
            println!("🚀 一括更新\n");

            println!("[1/3] 更新檔を検査中...");
            let preview = load_preview(&store, &incoming, lang)?;
            print_preview(&preview, lang);
            save_report(&preview.report, report.as_deref())?;

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("{} に適用しますか？", master_path.display()))
                    .default(false)
                    .interact()
                    .context("確認入力に失敗しました")?;
                if !confirmed {
                    return Err(CatalogError::Aborted.into());
                }
            }

            println!("[2/3] バックアップ・マージ中...");
            let options = UpsertOptions {
                backup_on_noop: backup_on_noop.unwrap_or(config.backup_on_noop),
            };
            let outcome = preview
                .apply(&store, options, &chrono::Local::now())
                .with_context(|| format!("{} を更新できません", master_path.display()))?;

            if let Some(backup) = &outcome.backup {
                println!("✔ {}{}", lang.text(Label::BackupCreated), backup.display());
            }

            println!("[3/3] 保存");
            if outcome.written {
                println!("✔ {} ({}件)", master_path.display(), outcome.merged.len());
            } else {
                println!("✔ 変更なし（主檔は未更新）");
            }

            println!("\n✅ {}", lang.text(Label::UpdateDone));
        }

        Commands::Config {
            show,
            set_master,
            set_lang,
            set_backup_on_noop,
            set_pdf_quality,
            set_font,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(path) = set_master {
                config.master_path = path;
                changed = true;
            }
            if let Some(l) = set_lang {
                config.lang = l;
                changed = true;
            }
            if let Some(b) = set_backup_on_noop {
                config.backup_on_noop = b;
                changed = true;
            }
            if let Some(q) = set_pdf_quality {
                config.pdf_quality = q;
                changed = true;
            }
            if let Some(f) = set_font {
                config.font_path = Some(f);
                changed = true;
            }

            if changed {
                config.save().context("設定を保存できません")?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  主檔: {}", config.master_path.display());
                println!("  言語: {}", config.lang);
                println!("  0件更新時バックアップ: {}", config.backup_on_noop);
                println!("  PDF品質: {}", config.pdf_quality);
                println!(
                    "  フォント: {}",
                    config
                        .font_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定 (Helvetica)".into())
                );
            }
        }
    }

    Ok(())
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn master_dir(master_path: &Path) -> Option<PathBuf> {
    master_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// 主檔を読み込み（無ければ通知して空リスト）
fn load_master(store: &RecordStore, lang: Lang) -> Vec<Record> {
    if !store.exists() {
        eprintln!(
            "{}",
            lang.text(Label::MasterNotFound)
                .replace("{f}", &store.path().display().to_string())
        );
    }
    store.load()
}

fn load_report(filter: &FilterArgs) -> anyhow::Result<Option<DiffReport>> {
    match &filter.diff_report {
        Some(path) => {
            let report = DiffReport::from_file(path)
                .with_context(|| format!("差分結果を読み込めません: {}", path.display()))?;
            Ok(Some(report))
        }
        None => Ok(None),
    }
}

fn load_preview(store: &RecordStore, incoming: &Path, lang: Lang) -> anyhow::Result<UpsertPreview> {
    match upsert::preview(store, incoming) {
        Ok(preview) => Ok(preview),
        Err(CatalogError::MissingColumns(cols)) => {
            bail!("{}{}", lang.text(Label::MissingColumns), join_columns(&cols))
        }
        Err(e) => Err(e).with_context(|| format!("更新檔を処理できません: {}", incoming.display())),
    }
}

fn save_report(report: &DiffReport, path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = path {
        let json = report.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("差分結果を保存できません: {}", path.display()))?;
        println!("✔ 差分結果を保存: {}", path.display());
    }
    Ok(())
}

fn print_preview(preview: &UpsertPreview, lang: Lang) {
    let counts = preview.report.counts();
    println!("{}", lang.diff_counts(counts.inserted, counts.updated, counts.unchanged));

    for key in &preview.report.inserted {
        println!("  🆕 {}", key);
    }
    for key in &preview.report.updated {
        println!("  ✏️ {}", key);
    }
    println!();
}

fn print_card(record: &Record, lang: Lang, report: Option<&DiffReport>) {
    let key = record.key();
    let mark = match report {
        Some(r) if r.is_inserted(&key) => "🆕 ",
        Some(r) if r.is_updated(&key) => "✏️ ",
        _ => "",
    };

    println!("{}{}", mark, lang.field_line(Label::Model, &record.model));
    println!("  {}", lang.field_line(Label::Spec, &record.spec));
    println!("  {}", lang.field_line(Label::Material, &record.material));
    println!("  {}", lang.field_line(Label::Category, &record.category));
    if !record.image_path.is_empty() {
        println!("  🖼 {}", record.image_path);
    }
    println!();
}
