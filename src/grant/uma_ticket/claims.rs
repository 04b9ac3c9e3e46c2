use crate::{
    grant::uma_ticket::{ClaimToken, NeedInfo},
    platform::{MaybeSend, MaybeSendSync},
};

/// Supplies claims when the authorization server answers `need_info`.
///
/// Returning `None` ends the negotiation with a denial: declining to supply
/// claims and failing to obtain them look the same to the server.
///
/// Any `Fn(NeedInfo) -> impl Future<Output = Option<ClaimToken>>` is a
/// supplier. [`SyncClaims`] adapts a synchronous closure, [`NoClaims`] never
/// supplies anything, and a [`ClaimToken`] supplies a copy of itself to every
/// challenge.
pub trait ClaimSupplier: MaybeSendSync {
    /// Produces a claim token for `need_info`, or `None` to give up.
    fn supply(&self, need_info: NeedInfo) -> impl Future<Output = Option<ClaimToken>> + MaybeSend;
}

impl<F, Fut> ClaimSupplier for F
where
    F: Fn(NeedInfo) -> Fut + MaybeSendSync,
    Fut: Future<Output = Option<ClaimToken>> + MaybeSend,
{
    fn supply(&self, need_info: NeedInfo) -> impl Future<Output = Option<ClaimToken>> + MaybeSend {
        self(need_info)
    }
}

/// A supplier that never has claims to give.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClaims;

impl ClaimSupplier for NoClaims {
    async fn supply(&self, _need_info: NeedInfo) -> Option<ClaimToken> {
        None
    }
}

/// Adapts a synchronous function into a [`ClaimSupplier`].
#[derive(Debug, Clone, Copy)]
pub struct SyncClaims<F>(pub F);

impl<F> ClaimSupplier for SyncClaims<F>
where
    F: Fn(NeedInfo) -> Option<ClaimToken> + MaybeSendSync,
{
    async fn supply(&self, need_info: NeedInfo) -> Option<ClaimToken> {
        (self.0)(need_info)
    }
}

impl ClaimSupplier for ClaimToken {
    async fn supply(&self, need_info: NeedInfo) -> Option<ClaimToken> {
        if !need_info.accepts_format(self.format()) {
            tracing::debug!(
                format = self.format(),
                "Supplying a claim token in a format the server did not list"
            );
        }
        Some(self.clone())
    }
}
