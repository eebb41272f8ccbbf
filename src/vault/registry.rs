//! Service CRUD on an unlocked vault.
//!
//! These methods only touch the in-memory collection.  Commands follow
//! each mutation with exactly one `Vault::save`, and report failure if
//! that save fails.

use zeroize::Zeroize;

use crate::clipboard::ClipboardSink;
use crate::crypto::generator;
use crate::errors::{PasskeyError, Result};

use super::service::Service;
use super::store::Vault;

impl Vault {
    /// Append a new service with the given password.
    ///
    /// Fails with `ServiceAlreadyExists` if the name is taken; the
    /// collection is unchanged in that case.
    pub fn add_service(&mut self, name: &str, password: String) -> Result<&Service> {
        if self.contains(name) {
            return Err(PasskeyError::ServiceAlreadyExists(name.to_string()));
        }

        self.services.push(Service::new(name, password));
        Ok(&self.services[self.services.len() - 1])
    }

    /// Look up a service by exact name.
    pub fn get_service(&self, name: &str) -> Result<&Service> {
        self.services
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| PasskeyError::ServiceNotFound(name.to_string()))
    }

    /// All services in insertion order.
    pub fn list_services(&self) -> &[Service] {
        &self.services
    }

    /// Remove the service named `name` and return its name.
    ///
    /// The removed password is wiped before the entry is dropped.
    pub fn delete_service(&mut self, name: &str) -> Result<String> {
        let index = self
            .position(name)
            .ok_or_else(|| PasskeyError::ServiceNotFound(name.to_string()))?;
        let mut removed = self.services.remove(index);
        removed.password.zeroize();
        Ok(removed.name)
    }

    /// Rename a service and optionally regenerate its password.
    ///
    /// The position and `created_at` of the entry are preserved.  The
    /// replacement password is generated before anything is modified,
    /// so either both changes land or neither does.
    pub fn update_service(
        &mut self,
        old_name: &str,
        new_name: &str,
        regenerate_password: bool,
    ) -> Result<&Service> {
        let index = self
            .position(old_name)
            .ok_or_else(|| PasskeyError::ServiceNotFound(old_name.to_string()))?;

        if new_name != old_name && self.contains(new_name) {
            return Err(PasskeyError::ServiceAlreadyExists(new_name.to_string()));
        }

        let new_password = if regenerate_password {
            Some(generator::generate()?)
        } else {
            None
        };

        let service = &mut self.services[index];
        if new_name != old_name {
            service.name = new_name.to_string();
        }
        if let Some(password) = new_password {
            service.password = password;
        }

        Ok(&self.services[index])
    }

    /// Hand a service's password to the clipboard.  Never mutates the vault.
    pub fn copy_service_password(&self, name: &str, sink: &mut dyn ClipboardSink) -> Result<()> {
        let service = self.get_service(name)?;
        sink.copy_text(&service.password)
    }
}
