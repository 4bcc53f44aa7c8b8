//! Request shapes accepted by [`Driver::get`](crate::Driver::get).
//!
//! A scalar key and a sequence of keys have different lifecycles and
//! different results, so the request type selects the output type:
//! - `&str`, `String`, `&String` → [`DocumentEnvelope`]
//! - `Vec<K>`, `&Vec<K>`, `&[K]`, `[K; N]` → [`BatchGet`]

use super::BatchGet;
use super::Completion;
use crate::DocumentEnvelope;
use crate::Driver;
use crate::Error;
use crate::Key;
use crate::Result;
use crate::StoreClient;

mod sealed {
    pub trait Sealed {}
}

pub trait GetRequest: sealed::Sealed {
    type Output: Send + 'static;

    #[doc(hidden)]
    fn dispatch<S: StoreClient>(
        self,
        driver: &Driver<S>,
    ) -> Completion<Self::Output>;
}

pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidRequest("key must not be empty".to_string()));
    }
    Ok(())
}

pub(crate) fn validate_keys<K: AsRef<str>>(keys: &[K]) -> Result<Vec<Key>> {
    keys.iter()
        .enumerate()
        .map(|(index, key)| {
            let key = key.as_ref();
            if key.is_empty() {
                return Err(Error::InvalidRequest(format!(
                    "key at position {index} must not be empty"
                )));
            }
            Ok(key.to_string())
        })
        .collect()
}

fn scalar<S: StoreClient>(
    driver: &Driver<S>,
    key: &str,
) -> Completion<DocumentEnvelope> {
    match validate_key(key) {
        Ok(()) => driver.get_one(key.to_string()),
        Err(e) => driver.reject("get", e),
    }
}

fn batch<S: StoreClient, K: AsRef<str>>(
    driver: &Driver<S>,
    keys: &[K],
) -> Completion<BatchGet> {
    match validate_keys(keys) {
        Ok(keys) => driver.get_batch(keys),
        Err(e) => driver.reject("get", e),
    }
}

impl sealed::Sealed for &str {}
impl GetRequest for &str {
    type Output = DocumentEnvelope;

    fn dispatch<S: StoreClient>(
        self,
        driver: &Driver<S>,
    ) -> Completion<DocumentEnvelope> {
        scalar(driver, self)
    }
}

impl sealed::Sealed for String {}
impl GetRequest for String {
    type Output = DocumentEnvelope;

    fn dispatch<S: StoreClient>(
        self,
        driver: &Driver<S>,
    ) -> Completion<DocumentEnvelope> {
        scalar(driver, &self)
    }
}

impl sealed::Sealed for &String {}
impl GetRequest for &String {
    type Output = DocumentEnvelope;

    fn dispatch<S: StoreClient>(
        self,
        driver: &Driver<S>,
    ) -> Completion<DocumentEnvelope> {
        scalar(driver, self)
    }
}

impl<K: AsRef<str>> sealed::Sealed for Vec<K> {}
impl<K: AsRef<str>> GetRequest for Vec<K> {
    type Output = BatchGet;

    fn dispatch<S: StoreClient>(
        self,
        driver: &Driver<S>,
    ) -> Completion<BatchGet> {
        batch(driver, &self)
    }
}

impl<K: AsRef<str>> sealed::Sealed for &Vec<K> {}
impl<K: AsRef<str>> GetRequest for &Vec<K> {
    type Output = BatchGet;

    fn dispatch<S: StoreClient>(
        self,
        driver: &Driver<S>,
    ) -> Completion<BatchGet> {
        batch(driver, self)
    }
}

impl<K: AsRef<str>> sealed::Sealed for &[K] {}
impl<K: AsRef<str>> GetRequest for &[K] {
    type Output = BatchGet;

    fn dispatch<S: StoreClient>(
        self,
        driver: &Driver<S>,
    ) -> Completion<BatchGet> {
        batch(driver, self)
    }
}

impl<K: AsRef<str>, const N: usize> sealed::Sealed for [K; N] {}
impl<K: AsRef<str>, const N: usize> GetRequest for [K; N] {
    type Output = BatchGet;

    fn dispatch<S: StoreClient>(
        self,
        driver: &Driver<S>,
    ) -> Completion<BatchGet> {
        batch(driver, &self)
    }
}
