//! Commands for the list screens.
//!
//! These commands call the [`HotelApi`] and send results back through the
//! owning screen's message channel.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::list::ListMsg;
use super::resource::Resource;
use crate::api::{HotelApi, PageRequest};
use crate::core::Command;

/// Fetch one page of `R`.
///
/// `seq` identifies the request so the screen can drop responses that were
/// overtaken by a newer one.
pub struct FetchPageCmd<R> {
    api: Arc<dyn HotelApi>,
    seq: u64,
    request: PageRequest,
    tx: UnboundedSender<ListMsg<R>>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> FetchPageCmd<R> {
    pub fn new(
        api: Arc<dyn HotelApi>,
        seq: u64,
        request: PageRequest,
        tx: UnboundedSender<ListMsg<R>>,
    ) -> Self {
        Self {
            api,
            seq,
            request,
            tx,
            _resource: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Resource> Command for FetchPageCmd<R> {
    fn name(&self) -> String {
        format!(
            "Loading {} (page {})",
            R::NAME.to_lowercase(),
            self.request.page
        )
    }

    async fn execute(self: Box<Self>) -> color_eyre::Result<()> {
        let seq = self.seq;
        match R::fetch(self.api.as_ref(), self.request).await {
            Ok(page) => {
                let _ = self.tx.send(ListMsg::Loaded { seq, page });
            }
            Err(e) => {
                let _ = self.tx.send(ListMsg::LoadFailed {
                    seq,
                    error: e.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Delete a single record.
pub struct DeleteCmd<R> {
    api: Arc<dyn HotelApi>,
    row: R,
    tx: UnboundedSender<ListMsg<R>>,
}

impl<R: Resource> DeleteCmd<R> {
    pub fn new(api: Arc<dyn HotelApi>, row: R, tx: UnboundedSender<ListMsg<R>>) -> Self {
        Self { api, row, tx }
    }
}

#[async_trait]
impl<R: Resource> Command for DeleteCmd<R> {
    fn name(&self) -> String {
        format!("Deleting {}", self.row)
    }

    async fn execute(self: Box<Self>) -> color_eyre::Result<()> {
        let result = R::delete(self.api.as_ref(), self.row.id()).await;
        match result {
            Ok(message) => {
                let _ = self.tx.send(ListMsg::Deleted {
                    row: self.row,
                    message,
                });
            }
            Err(e) => {
                let _ = self.tx.send(ListMsg::DeleteFailed {
                    row: self.row,
                    error: e.to_string(),
                });
            }
        }
        Ok(())
    }
}
