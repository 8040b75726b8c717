use chrono::Utc;
use uuid::Uuid;

use medicart_domain::directory;

use crate::domain::repository::AddressRepository;
use crate::domain::types::{Address, AddressFields, AddressPatch};
use crate::error::ShopServiceError;

// ── CreateAddress ────────────────────────────────────────────────────────────

pub struct CreateAddressUseCase<R: AddressRepository> {
    pub repo: R,
}

impl<R: AddressRepository> CreateAddressUseCase<R> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        fields: AddressFields,
    ) -> Result<Address, ShopServiceError> {
        directory::validate(&fields.division, &fields.district, &fields.city)?;
        let now = Utc::now();
        let address = Address {
            id: Uuid::now_v7(),
            account_id,
            division: fields.division,
            district: fields.district,
            city: fields.city,
            address_line: fields.address_line,
            recipient_name: fields.recipient_name,
            phone: fields.phone,
            email: fields.email,
            version: 0,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&address).await?;
        Ok(address)
    }
}

// ── UpdateAddress ────────────────────────────────────────────────────────────

pub struct UpdateAddressUseCase<R: AddressRepository> {
    pub repo: R,
}

impl<R: AddressRepository> UpdateAddressUseCase<R> {
    /// Overwrite supplied fields of an owned address.
    ///
    /// When any location field is supplied, the merged triple (patch over
    /// stored values) must be in the directory.
    pub async fn execute(
        &self,
        account_id: Uuid,
        address_id: Uuid,
        patch: AddressPatch,
    ) -> Result<Address, ShopServiceError> {
        if patch.is_empty() {
            return Err(ShopServiceError::MissingData);
        }
        let current = self
            .repo
            .find_owned(account_id, address_id)
            .await?
            .ok_or(ShopServiceError::AddressNotFound)?;

        let validate = patch.touches_location();
        let updated = current.patched(patch);
        if validate {
            directory::validate(&updated.division, &updated.district, &updated.city)?;
        }

        if !self.repo.update(&updated).await? {
            return Err(ShopServiceError::StaleWrite);
        }
        Ok(Address {
            version: updated.version + 1,
            updated_at: Utc::now(),
            ..updated
        })
    }
}

// ── DeleteAddress ────────────────────────────────────────────────────────────

pub struct DeleteAddressUseCase<R: AddressRepository> {
    pub repo: R,
}

impl<R: AddressRepository> DeleteAddressUseCase<R> {
    pub async fn execute(&self, account_id: Uuid, address_id: Uuid) -> Result<(), ShopServiceError> {
        if self.repo.delete_owned(account_id, address_id).await? {
            Ok(())
        } else {
            Err(ShopServiceError::AddressNotFound)
        }
    }
}

// ── ListAddresses ────────────────────────────────────────────────────────────

pub struct ListAddressesUseCase<R: AddressRepository> {
    pub repo: R,
}

impl<R: AddressRepository> ListAddressesUseCase<R> {
    pub async fn execute(&self, account_id: Uuid) -> Result<Vec<Address>, ShopServiceError> {
        self.repo.list_by_account(account_id).await
    }
}
