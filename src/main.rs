use clap::Parser;
use dialoguer::Confirm;
use florascan::{cli, client, config, error, image, logging, storage, view};
use florascan_common::{
    identify_and_store, sample_dataset_json, saved_message, DatasetManager, ResultSlot,
    SAMPLE_FILE_NAME,
};
use cli::{Cli, Commands};
use config::Config;
use error::{FloraScanError, Result};
use std::io::Read;
use std::path::PathBuf;

const CLEAR_PROMPT: &str = "Clear the current dataset? The default plants will show on Home again.";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        if e.is_user_facing() {
            eprintln!("✗ {}", e);
        } else {
            tracing::error!("{}", e);
            eprintln!("✗ エラー: {}", e);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    let store_path = match cli.store {
        Some(path) => path,
        None => config.storage_file()?,
    };
    let store = storage::FileStore::new(store_path);
    tracing::debug!("storage: {}", store.path().display());

    match cli.command {
        Commands::Import { file } => {
            if !file.is_file() {
                return Err(FloraScanError::FileNotFound(file.display().to_string()));
            }
            let text = std::fs::read_to_string(&file)?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            let manager = DatasetManager::new(&store);
            let count = manager.import_upload(&file_name, &text)?;
            println!("✔ {}\n", saved_message(count));
            print!("{}", view::render_dataset_view(&manager.refresh_view()));
        }

        Commands::Paste => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;

            let manager = DatasetManager::new(&store);
            let count = manager.import_paste(&text)?;
            println!("✔ {}\n", saved_message(count));
            print!("{}", view::render_dataset_view(&manager.refresh_view()));
        }

        Commands::Show => {
            let manager = DatasetManager::new(&store);
            print!("{}", view::render_dataset_view(&manager.refresh_view()));
        }

        Commands::Clear { yes } => {
            let manager = DatasetManager::new(&store);
            let confirmed = yes
                || Confirm::new()
                    .with_prompt(CLEAR_PROMPT)
                    .default(false)
                    .interact()
                    .map_err(|e| FloraScanError::Prompt(e.to_string()))?;

            if confirmed {
                manager.clear()?;
                println!("✔ データセットを削除しました\n");
            }
            print!("{}", view::render_dataset_view(&manager.refresh_view()));
        }

        Commands::Sample { output } => {
            let output = output.unwrap_or_else(|| PathBuf::from(SAMPLE_FILE_NAME));
            std::fs::write(&output, sample_dataset_json()?)?;
            println!("✔ サンプルを書き出しました: {}", output.display());
        }

        Commands::Identify { image: image_path, description } => {
            let staged_image = match image_path {
                Some(path) => Some(image::load_image(&path)?),
                None => None,
            };

            let client = client::HttpIdentificationClient::new(&config.api_base(), config.timeout())?;
            let slot = ResultSlot::new(&store);
            let result = identify_and_store(&client, &slot, staged_image.as_deref(), &description).await?;
            print!("{}", view::render_result(&result));
        }

        Commands::Result => {
            let slot = ResultSlot::new(&store);
            match slot.load() {
                Some(result) => print!("{}", view::render_result(&result)),
                None => println!("識別結果がありません。`florascan identify` を実行してください"),
            }
        }

        Commands::Config { set_api_base, show } => {
            if let Some(base) = set_api_base {
                config.set_api_base(base)?;
                println!("✔ APIオリジンを設定しました");
            }

            if show {
                println!("設定:");
                println!("  APIオリジン: {}", config.api_base());
                println!("  保存先: {}", config.storage_file()?.display());
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: 既定"),
                }
            }
        }
    }

    Ok(())
}
