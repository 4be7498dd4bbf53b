use std::{path::Path, str::FromStr, time::Duration};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info, warn};
use serde::Serialize;

use crowdsale_common::{
    address::{Address, TxHash},
    amount::Amount,
    config::VESTING_ID_SEPARATOR,
    entity::Vesting,
    event::{ContractEvent, EventRecordKind},
    get_cli_styles,
    logger::{init_logger, LogLevel, LoggerConfig},
};
use crowdsale_indexer::{
    config::{defaults, BlockTag, IndexerConfig, VERSION},
    core::{
        indexer::Indexer,
        reader::{ContractReader, RpcContractReader, StaticContractReader},
        storage::{EventRecordProvider, SledStorage, Storage},
    },
};

#[derive(Parser, Debug)]
#[clap(
    version = VERSION,
    about = "Aggregate ledger of crowdsale and vesting contract events",
    styles = get_cli_styles()
)]
#[command(name = "crowdsale_indexer")]
pub struct CliConfig {
    /// Set log level
    #[clap(long, value_enum, default_value_t = defaults::LOG_LEVEL)]
    log_level: LogLevel,

    /// Disable the log file
    #[clap(long)]
    disable_file_logging: bool,

    /// Disable the usage of colors in log
    #[clap(long)]
    disable_log_color: bool,

    /// Log filename
    #[clap(long, default_value_t = String::from(defaults::FILENAME_LOG))]
    filename_log: String,

    /// Logs directory
    #[clap(long, default_value_t = String::from(defaults::LOGS_PATH))]
    logs_path: String,

    /// Ledger database directory
    #[clap(long, default_value_t = String::from(defaults::DIR_PATH))]
    dir_path: String,

    /// Sled cache capacity in bytes
    #[clap(long)]
    cache_size: Option<u64>,

    /// Ethereum JSON-RPC endpoint used for contract reads
    #[clap(long)]
    rpc_url: Option<String>,

    /// JSON file with fixed contract answers, used instead of a node
    #[clap(long)]
    contract_state: Option<String>,

    /// Block at which contracts are read through the RPC endpoint
    #[clap(long, value_enum, default_value_t = defaults::BLOCK_TAG)]
    block_tag: BlockTag,

    /// RPC request timeout in seconds
    #[clap(long, default_value_t = defaults::REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    /// JSON File to load the configuration from
    #[clap(long)]
    config_file: Option<String>,

    /// Generate the template at the `config_file` path
    #[clap(long)]
    generate_config_template: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

impl CliConfig {
    fn to_indexer_config(&self) -> IndexerConfig {
        IndexerConfig {
            log_level: self.log_level,
            disable_file_logging: self.disable_file_logging,
            disable_log_color: self.disable_log_color,
            filename_log: self.filename_log.clone(),
            logs_path: self.logs_path.clone(),
            dir_path: self.dir_path.clone(),
            cache_size: self.cache_size,
            rpc_url: self.rpc_url.clone(),
            contract_state: self.contract_state.clone(),
            block_tag: self.block_tag,
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a JSON lines file of contract events, in chain order
    Replay {
        #[clap(long)]
        events: String,
    },
    /// Print stored entities as JSON
    Show {
        #[clap(value_enum)]
        entity: ShowEntity,
        #[clap(required = true)]
        ids: Vec<String>,
    },
    /// List stored event records of one kind
    Events {
        #[clap(value_enum)]
        kind: EventRecordKind,
        #[clap(long, default_value_t = 0)]
        skip: usize,
        #[clap(long, default_value_t = defaults::LIST_LIMIT)]
        limit: usize,
    },
    /// Print the cursor and the number of stored entities
    Status,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShowEntity {
    Account,
    Crowdsale,
    Vault,
    Vesting,
    Wallet,
    Token,
    Transaction,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_config = CliConfig::parse();

    if let Some(path) = cli_config.config_file.as_ref() {
        if cli_config.generate_config_template {
            if Path::new(path).exists() {
                eprintln!("Config file already exists at {}", path);
                return Ok(());
            }

            IndexerConfig::generate_template(path)?;
            println!("Config file template generated at {}", path);
            return Ok(());
        }
    }

    let config = match cli_config.config_file.as_ref() {
        Some(path) => IndexerConfig::from_file(path)?,
        None => {
            let config = cli_config.to_indexer_config();
            config.validate()?;
            config
        }
    };

    init_logger(LoggerConfig {
        level: config.log_level,
        dir_path: &config.logs_path,
        filename_log: &config.filename_log,
        disable_file_logging: config.disable_file_logging,
        disable_file_log_date_based: false,
        disable_colors: config.disable_log_color,
        module_levels: &[],
    })?;

    let Some(command) = cli_config.command else {
        bail!("No command given, see --help");
    };

    if log::log_enabled!(log::Level::Info) {
        info!("Crowdsale indexer v{}", VERSION);
    }

    let result = match (config.rpc_url.as_ref(), config.contract_state.as_ref()) {
        (Some(url), _) => {
            let reader = RpcContractReader::new(
                url,
                config.block_tag,
                Duration::from_secs(config.request_timeout_secs),
            )?;
            run(&config, reader, command).await
        }
        (None, Some(path)) => run(&config, StaticContractReader::from_file(path)?, command).await,
        (None, None) => run(&config, StaticContractReader::default(), command).await,
    };

    if let Err(e) = result.as_ref() {
        error!("{:#}", e);
    }
    result
}

async fn run<R: ContractReader>(config: &IndexerConfig, reader: R, command: Command) -> Result<()> {
    let storage = SledStorage::new(&config.dir_path, config.cache_size)?;
    let mut indexer = Indexer::new(storage, reader);

    let result = match command {
        Command::Replay { events } => replay(&mut indexer, &events).await,
        Command::Show { entity, ids } => show(indexer.storage(), entity, &ids).await,
        Command::Events { kind, skip, limit } => {
            let records = indexer
                .storage()
                .list_event_records(kind, skip, limit)
                .await?;
            print_json(&records)
        }
        Command::Status => print_json(&indexer.storage().get_stats().await?),
    };

    indexer.close().await?;
    result
}

fn read_events(path: &str) -> Result<Vec<ContractEvent>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read events file '{}'", path))?;

    let mut events = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let event: ContractEvent = serde_json::from_str(line)
            .with_context(|| format!("Invalid event at line {} of '{}'", i + 1, path))?;
        events.push(event);
    }
    Ok(events)
}

async fn replay<S: Storage, R: ContractReader>(
    indexer: &mut Indexer<S, R>,
    path: &str,
) -> Result<()> {
    let events = read_events(path)?;
    if log::log_enabled!(log::Level::Info) {
        info!("Replaying {} events from {}", events.len(), path);
    }

    if let Some(pair) = events.windows(2).find(|pair| pair[1].id() <= pair[0].id()) {
        warn!(
            "Events are not in chain order: {} comes after {}",
            pair[1].id(),
            pair[0].id()
        );
    }

    let summary = indexer.process_all(events).await?;
    print_json(&summary)
}

fn parse_address(id: &str) -> Result<Address> {
    Address::from_str(id).map_err(|e| anyhow!("Invalid address '{}': {}", id, e))
}

// Accepts any address casing and rebuilds the canonical vesting id
fn parse_vesting_id(id: &str) -> Result<String> {
    let parts: Vec<&str> = id.split(VESTING_ID_SEPARATOR).collect();
    let [vault, beneficiary, release_time] = parts.as_slice() else {
        bail!("Invalid vesting id '{}', expected vault/beneficiary/release_time", id);
    };
    let release_time = Amount::from_str(release_time)
        .map_err(|e| anyhow!("Invalid release time '{}': {}", release_time, e))?;
    Ok(Vesting::id_for(
        &parse_address(vault)?,
        &parse_address(beneficiary)?,
        &release_time,
    ))
}

async fn show<S: Storage>(storage: &S, entity: ShowEntity, ids: &[String]) -> Result<()> {
    for id in ids {
        let found = match entity {
            ShowEntity::Account => to_json(storage.get_account(&parse_address(id)?).await?)?,
            ShowEntity::Crowdsale => to_json(storage.get_crowdsale(&parse_address(id)?).await?)?,
            ShowEntity::Vault => to_json(storage.get_vesting_vault(&parse_address(id)?).await?)?,
            ShowEntity::Vesting => to_json(storage.get_vesting(&parse_vesting_id(id)?).await?)?,
            ShowEntity::Wallet => to_json(storage.get_vesting_wallet(&parse_address(id)?).await?)?,
            ShowEntity::Token => to_json(storage.get_erc20(&parse_address(id)?).await?)?,
            ShowEntity::Transaction => {
                let hash = TxHash::from_str(id)
                    .map_err(|e| anyhow!("Invalid transaction hash '{}': {}", id, e))?;
                to_json(storage.get_transaction(&hash).await?)?
            }
        };

        match found {
            Some(json) => println!("{}", json),
            None => println!("{:?} {} not found", entity, id),
        }
    }
    Ok(())
}

fn to_json<T: Serialize>(value: Option<T>) -> Result<Option<String>> {
    value
        .map(|v| serde_json::to_string_pretty(&v))
        .transpose()
        .map_err(Into::into)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
