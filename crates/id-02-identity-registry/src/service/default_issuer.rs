//! # Default-Issuer Coordinator
//!
//! The current default issuer is whoever owns the single
//! `(did.issuer:default~uuid, [issuerId])` index entry. Creating an issuer
//! either claims that entry or leaves it alone.
//!
//! If several entries are found (left over from an earlier failure), an
//! issuer claiming the default demotes all of them, so the index heals on the
//! next claim. A non-claiming issuer leaves them as they are.

use super::*;
use crate::domain::entities::Issuer;
use crate::domain::value_objects::{DocType, IndexTag};
use id_01_ledger_index::{create_index, delete_index};

impl<'a, L, C, P, G> Invocation<'a, L, C, P, G>
where
    L: LedgerStore + ?Sized,
    C: CallerIdentity + ?Sized,
    P: CertificateParser,
    G: IdGenerator,
{
    /// IDs under the default-issuer index, in key order.
    pub(crate) fn default_issuer_ids(&self) -> Result<Vec<String>, IdentityError> {
        self.index_entries(IndexTag::IssuerByDefault, &[])?
            .iter()
            .map(|key| {
                key.attribute(0)
                    .map(str::to_string)
                    .map_err(IdentityError::from)
            })
            .collect()
    }

    /// Decide whether the new issuer `issuer_id` becomes the default and
    /// update the index accordingly. Returns the flag to store on the new
    /// record.
    ///
    /// - no default yet: the new issuer becomes default whatever it asked for
    /// - default requested: every current default is demoted first
    /// - otherwise: nothing changes
    pub(crate) fn settle_default_issuer(
        &mut self,
        issuer_id: &str,
        requested: bool,
    ) -> Result<bool, IdentityError> {
        let current = self.default_issuer_ids()?;

        if current.len() > 1 {
            #[cfg(feature = "tracing-log")]
            tracing::warn!(
                defaults = ?current,
                "[id-02] more than one default issuer index entry"
            );
        }

        if !current.is_empty() && !requested {
            return Ok(false);
        }

        for previous in &current {
            self.demote_issuer(previous)?;
        }

        create_index(&mut *self.ledger, IndexTag::IssuerByDefault.tag(), &[issuer_id])?;

        #[cfg(feature = "tracing-log")]
        tracing::info!(
            issuer_id = %issuer_id,
            previous = ?current,
            forced = !requested,
            "[id-02] default issuer reassigned"
        );

        Ok(true)
    }

    /// Clear the default flag of `issuer_id` and drop its index entry.
    fn demote_issuer(&mut self, issuer_id: &str) -> Result<(), IdentityError> {
        match self.read_record::<Issuer>(DocType::Issuer, issuer_id)? {
            Some(mut issuer) => {
                issuer.is_default = false;
                self.write_record(DocType::Issuer, issuer_id, &issuer)?;
            }
            None => {
                #[cfg(feature = "tracing-log")]
                tracing::warn!(issuer_id = %issuer_id, "[id-02] default index points at a missing issuer");
            }
        }
        delete_index(&mut *self.ledger, IndexTag::IssuerByDefault.tag(), &[issuer_id], true)?;
        Ok(())
    }
}
