//! Provider use-case service.

use crate::model::provider::Provider;
use crate::model::record::{Document, RecordId};
use crate::query::list::ProviderListQuery;
use crate::repo::provider_repo::ProviderRepository;
use crate::repo::RepoResult;
use log::{debug, info};

pub struct ProviderService<R: ProviderRepository> {
    repo: R,
}

impl<R: ProviderRepository> ProviderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_provider(&self, provider: &Provider) -> RepoResult<RecordId> {
        let id = self.repo.insert_provider(provider)?;
        info!("event=provider_create module=service status=ok id={id}");
        Ok(id)
    }

    pub fn list_providers(&self, query: &ProviderListQuery) -> RepoResult<Vec<Document<Provider>>> {
        let limit = query.applied_limit();
        let providers = self.repo.find_providers(&query.filter(), limit)?;
        debug!(
            "event=provider_list module=service status=ok searched={} limit={} count={}",
            query.q.is_some(),
            limit,
            providers.len()
        );
        Ok(providers)
    }
}
