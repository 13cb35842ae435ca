//! CLI runner - executes commands

use crate::auth::{PasswordGrant, TokenClient};
use crate::cli::commands::{
    Cli, Commands, OutputFormat, PageArgs, RecordFilterArgs, RecordsCommand, TokenArgs,
};
use crate::client::AccelaClient;
use crate::config::ClientConfig;
use crate::entity::{self, Entity};
use crate::error::{Error, Result};
use crate::pagination::ListResponse;
use crate::resources::{
    ListOptions, MyRecordListParams, RecordListParams, RetrieveOptions, SearchOptions,
};
use crate::types::JsonValue;
use futures::TryStreamExt;
use std::fs;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Token(args) => self.token(args).await,
            Commands::Records { action } => self.records(action).await,
            Commands::MyRecords { filter, page } => {
                let params = MyRecordListParams {
                    limit: Some(page.limit),
                    offset: Some(page.offset),
                    record_type: filter.record_type.clone(),
                    module: filter.module.clone(),
                    status: filter.status.clone(),
                    custom_id: filter.custom_id.clone(),
                    opened_date_from: filter.opened_from,
                    opened_date_to: filter.opened_to,
                    status_date_from: filter.status_from,
                    status_date_to: filter.status_to,
                    ..Default::default()
                };
                let list = self.client()?.my_records()?.list(&params).await?;
                self.emit_list(list, page.all).await
            }
            Commands::Activities {
                record_id,
                fields,
                page,
            } => {
                let options = list_options(page, fields);
                let list = self
                    .client()?
                    .record_activities()?
                    .list(record_id, &options)
                    .await?;
                self.emit_list(list, page.all).await
            }
            Commands::WorkflowHistories {
                record_id,
                fields,
                page,
            } => {
                let options = list_options(page, fields);
                let list = self
                    .client()?
                    .record_workflow_task_histories()?
                    .list(record_id, &options)
                    .await?;
                self.emit_list(list, page.all).await
            }
        }
    }

    async fn records(&self, action: &RecordsCommand) -> Result<()> {
        let records = self.client()?.records()?;

        match action {
            RecordsCommand::List {
                filter,
                assigned_to_department,
                assigned_user,
                page,
            } => {
                let params = RecordListParams {
                    assigned_to_department: assigned_to_department.clone(),
                    assigned_user: assigned_user.clone(),
                    ..record_list_params(filter, page)
                };
                let list = records.list(&params).await?;
                self.emit_list(list, page.all).await
            }
            RecordsCommand::Get {
                custom_id,
                expand,
                fields,
            } => {
                let options = RetrieveOptions {
                    expand: expand.clone(),
                    fields: fields.clone(),
                    expand_custom_forms: None,
                };
                let record = records.retrieve(custom_id, &options).await?;
                self.emit(&record)
            }
            RecordsCommand::Search {
                query,
                expand,
                page,
            } => {
                let body = read_json_arg(query)?;
                let options = SearchOptions {
                    limit: Some(page.limit),
                    offset: Some(page.offset),
                    expand: expand.clone(),
                    ..Default::default()
                };
                let list = records.search(body, &options).await?;
                self.emit_list(list, page.all).await
            }
            RecordsCommand::Find { text, page } => {
                let list = records.global_search(text, page.limit, page.offset).await?;
                self.emit_list(list, page.all).await
            }
        }
    }

    /// Exchange credentials and print the token
    async fn token(&self, args: &TokenArgs) -> Result<()> {
        let config = self.client_config_base()?;
        let agency = self
            .cli
            .agency
            .clone()
            .or_else(|| config.agency.clone())
            .ok_or_else(|| Error::config("--agency is required to request a token"))?;
        let environment = self
            .cli
            .environment
            .clone()
            .or_else(|| config.environment.clone())
            .ok_or_else(|| Error::config("--environment is required to request a token"))?;

        let mut grant = PasswordGrant::new(
            args.client_id.clone(),
            args.client_secret.clone(),
            args.username.clone(),
            args.password.clone(),
            agency,
            environment,
            args.scope.clone(),
        );
        if let Some(provider) = &args.id_provider {
            grant = grant.id_provider(provider.clone());
        }

        let mut token_client = TokenClient::with_config(&config.http_client_config())?;
        if let Some(url) = &args.token_url {
            token_client = token_client.token_url(url.clone());
        }

        let token = token_client.fetch_access_token(&grant).await?;
        info!(expires_at = %token.expires_at, "Access token issued");

        self.output_message(&serde_json::to_value(&token)?);
        Ok(())
    }

    /// Load the config file (if any) without requiring a token
    fn client_config_base(&self) -> Result<ClientConfig> {
        match &self.cli.config {
            Some(path) => ClientConfig::from_file(path),
            None => Ok(ClientConfig::new(self.cli.token.clone().unwrap_or_default())),
        }
    }

    /// Merge the config file with command-line overrides
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = self.client_config_base()?;

        if let Some(token) = &self.cli.token {
            config.access_token = token.clone();
        }
        if let Some(agency) = &self.cli.agency {
            config.agency = Some(agency.clone());
        }
        if let Some(environment) = &self.cli.environment {
            config.environment = Some(environment.clone());
        }
        if let Some(zone) = &self.cli.timezone {
            config.timezone = Some(zone.clone());
        }
        if let Some(url) = &self.cli.base_url {
            config.base_url = url.clone();
        }

        if config.access_token.trim().is_empty() {
            return Err(Error::config(
                "No access token; pass --token, set ACCELA_ACCESS_TOKEN or use --config",
            ));
        }
        Ok(config)
    }

    fn client(&self) -> Result<AccelaClient> {
        AccelaClient::from_config(&self.client_config()?)
    }

    /// Print the current page, or every page with `all`
    async fn emit_list<E: Entity>(&self, list: ListResponse<E>, all: bool) -> Result<()> {
        if !all {
            for item in &list {
                self.emit(item)?;
            }
            if list.has_more() {
                info!(
                    offset = list.offset(),
                    limit = list.limit(),
                    total = list.total(),
                    "More results available; use --all or a larger --offset"
                );
            }
            return Ok(());
        }

        let stream = list.auto_paging_stream();
        futures::pin_mut!(stream);

        let mut count = 0usize;
        while let Some(item) = stream.try_next().await? {
            self.emit(&item)?;
            count += 1;
        }
        info!(count, "Listed all pages");
        Ok(())
    }

    fn emit<E: Entity>(&self, item: &E) -> Result<()> {
        let value = if self.cli.raw {
            JsonValue::Object(item.raw().clone())
        } else {
            JsonValue::Object(entity::encode(item)?)
        };
        self.output_message(&value);
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

fn record_list_params(filter: &RecordFilterArgs, page: &PageArgs) -> RecordListParams {
    RecordListParams {
        limit: Some(page.limit),
        offset: Some(page.offset),
        record_type: filter.record_type.clone(),
        module: filter.module.clone(),
        status: filter.status.clone(),
        custom_id: filter.custom_id.clone(),
        opened_date_from: filter.opened_from,
        opened_date_to: filter.opened_to,
        status_date_from: filter.status_from,
        status_date_to: filter.status_to,
        ..Default::default()
    }
}

fn list_options(page: &PageArgs, fields: &[String]) -> ListOptions {
    ListOptions {
        limit: Some(page.limit),
        offset: Some(page.offset),
        fields: fields.to_vec(),
    }
}

/// Inline JSON, or `@path` to read it from a file
fn read_json_arg(arg: &str) -> Result<JsonValue> {
    let text = match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read query file '{path}': {e}")))?,
        None => arg.to_string(),
    };
    Ok(serde_json::from_str(&text)?)
}
