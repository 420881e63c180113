// Copyright (c) 2025 - Cowboy AI, Inc.
//! Datacenter resolution by parent walk

use tracing::{debug, warn};

use crate::context::CallContext;
use crate::errors::{OffloadError, OffloadResult};
use crate::inventory::{Datacenter, EntityRef, HostRef, InventoryClient};

/// Parent fetches allowed before a walk is abandoned
pub const DEFAULT_MAX_HOPS: usize = 32;

/// Finds the datacenter that owns a host
///
/// Every parent fetch spends one hop. A chain whose datacenter sits N levels
/// above the host costs exactly N fetches; a chain that ends (or exceeds the
/// budget) without a datacenter is an error, never a loop.
#[derive(Debug, Clone, Copy)]
pub struct DatacenterResolver {
    max_hops: usize,
}

impl DatacenterResolver {
    pub fn new(max_hops: usize) -> Self {
        Self { max_hops }
    }

    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    pub async fn resolve<C>(
        &self,
        client: &C,
        host: &HostRef,
        ctx: &CallContext,
    ) -> OffloadResult<Datacenter>
    where
        C: InventoryClient + ?Sized,
    {
        let mut hops = 0usize;
        let first = self
            .fetch_parent(client, host, &host.reference, &mut hops, ctx)
            .await?;
        let mut current = match first {
            Some(parent) => parent,
            None => {
                return Err(OffloadError::DatacenterNotFound {
                    host: host.name.clone(),
                })
            }
        };

        loop {
            if current.is_datacenter() {
                let datacenter = ctx
                    .call(client.datacenter(&current))
                    .await
                    .map_err(|source| OffloadError::DatacenterLookup {
                        host: host.name.clone(),
                        entity: current.to_string(),
                        source,
                    })?;
                debug!(
                    parent: ctx.span(),
                    host = %host.name,
                    datacenter = %datacenter.name,
                    hops,
                    "resolved datacenter"
                );
                return Ok(datacenter);
            }

            current = match self.fetch_parent(client, host, &current, &mut hops, ctx).await? {
                Some(parent) => parent,
                None => {
                    warn!(
                        parent: ctx.span(),
                        host = %host.name,
                        last = %current,
                        "inventory chain ended without a datacenter"
                    );
                    return Err(OffloadError::DatacenterNotFound {
                        host: host.name.clone(),
                    });
                }
            };
        }
    }

    async fn fetch_parent<C>(
        &self,
        client: &C,
        host: &HostRef,
        entity: &EntityRef,
        hops: &mut usize,
        ctx: &CallContext,
    ) -> OffloadResult<Option<EntityRef>>
    where
        C: InventoryClient + ?Sized,
    {
        if *hops >= self.max_hops {
            return Err(OffloadError::HierarchyTooDeep {
                host: host.name.clone(),
                max_hops: self.max_hops,
            });
        }
        *hops += 1;

        let parent = ctx
            .call(client.parent_of(entity))
            .await
            .map_err(|source| OffloadError::Hierarchy {
                host: host.name.clone(),
                entity: entity.to_string(),
                source,
            })?;

        debug!(
            parent: ctx.span(),
            entity = %entity,
            parent_entity = ?parent.as_ref().map(ToString::to_string),
            hop = *hops,
            "walked inventory parent"
        );
        Ok(parent)
    }
}

impl Default for DatacenterResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HOPS)
    }
}
