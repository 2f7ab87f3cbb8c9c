use crate::storage::{Item, ScanPage, StoreError, TableSpec, TableStore};
use crate::utils::config::StoreConfig;
use anyhow::Result;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, GlobalSecondaryIndex, KeySchemaElement, KeyType,
    Projection, ProjectionType, ProvisionedThroughput, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;

/// DynamoDB Storage Layer
pub struct DynamoDBStore {
    client: Client,
    page_size: Option<i32>,
}

impl DynamoDBStore {
    /// Erstelle DynamoDB Client aus der Store-Konfiguration
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

        if let Some(endpoint) = config.endpoint() {
            loader = loader.endpoint_url(endpoint);
        }
        if config.local_credentials {
            // DynamoDB Local akzeptiert beliebige Credentials
            loader = loader.credentials_provider(Credentials::new(
                "local",
                "local",
                None,
                None,
                "hotel-seeder",
            ));
        }

        let sdk_config = loader.load().await;
        let client = Client::new(&sdk_config);

        tracing::info!(
            region = %config.region,
            endpoint = config.endpoint().unwrap_or("default"),
            "DynamoDB client initialized"
        );

        Ok(Self {
            client,
            page_size: config.page_size,
        })
    }
}

#[async_trait]
impl TableStore for DynamoDBStore {
    async fn scan_page(&self, table: &str, start_key: Option<Item>) -> Result<ScanPage, StoreError> {
        let response = self
            .client
            .scan()
            .table_name(table)
            .set_exclusive_start_key(start_key)
            .set_limit(self.page_size)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(ScanPage {
            items: response.items.unwrap_or_default(),
            last_evaluated_key: response.last_evaluated_key,
        })
    }

    async fn put_item(&self, table: &str, item: Item) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(())
    }

    async fn update_attribute(
        &self,
        table: &str,
        key: Item,
        name: &str,
        value: AttributeValue,
    ) -> Result<(), StoreError> {
        self.client
            .update_item()
            .table_name(table)
            .set_key(Some(key))
            .update_expression("SET #attr = :value")
            .expression_attribute_names("#attr", name)
            .expression_attribute_values(":value", value)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(())
    }

    async fn create_table(&self, spec: &TableSpec) -> Result<bool, StoreError> {
        let throughput = ProvisionedThroughput::builder()
            .read_capacity_units(spec.read_capacity)
            .write_capacity_units(spec.write_capacity)
            .build()
            .map_err(sdk_error)?;

        let mut defined = vec![spec.hash_key.as_str()];
        let mut request = self
            .client
            .create_table()
            .table_name(&spec.name)
            .key_schema(hash_key(&spec.hash_key)?)
            .attribute_definitions(string_attribute(&spec.hash_key)?)
            .provisioned_throughput(throughput.clone());

        for index in &spec.indexes {
            if !defined.contains(&index.hash_key.as_str()) {
                defined.push(&index.hash_key);
                request = request.attribute_definitions(string_attribute(&index.hash_key)?);
            }

            let gsi = GlobalSecondaryIndex::builder()
                .index_name(&index.name)
                .key_schema(hash_key(&index.hash_key)?)
                .projection(Projection::builder().projection_type(ProjectionType::All).build())
                .provisioned_throughput(throughput.clone())
                .build()
                .map_err(sdk_error)?;
            request = request.global_secondary_indexes(gsi);
        }

        match request.send().await {
            Ok(_) => Ok(true),
            Err(err) => match err.into_service_error() {
                CreateTableError::ResourceInUseException(_) => Ok(false),
                other => Err(sdk_error(other)),
            },
        }
    }
}

fn hash_key(name: &str) -> Result<KeySchemaElement, StoreError> {
    KeySchemaElement::builder()
        .attribute_name(name)
        .key_type(KeyType::Hash)
        .build()
        .map_err(sdk_error)
}

fn string_attribute(name: &str) -> Result<AttributeDefinition, StoreError> {
    AttributeDefinition::builder()
        .attribute_name(name)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(sdk_error)
}

fn sdk_error<E: std::error::Error + 'static>(err: E) -> StoreError {
    StoreError::Sdk(DisplayErrorContext(err).to_string())
}
