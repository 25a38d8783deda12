pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod document_storage_datasource;
        pub(crate) mod purchase_storage_datasource;
        pub(crate) mod receipt_verification_datasource;
        pub(crate) mod table_storage_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod storage_document {
            pub(crate) mod storage_document_model;
        }
        pub(crate) mod verify_receipt {
            pub(crate) mod verify_receipt_request_model;
            pub(crate) mod verify_receipt_response_model;
        }
    }
    pub(crate) mod repositories {
        pub(crate) mod entitlement_repository_impl;
    }
}

pub mod domain {
    pub mod entities {
        pub mod purchase_key;
        pub mod receipt_data;
        pub mod receipt_status;
        pub mod verdict;
    }
    pub mod repositories {
        pub mod entitlement_repository;
    }
}

pub mod config;
pub mod constants;
pub mod errors;
pub mod gateway;
