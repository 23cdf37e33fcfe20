//! Core engines and their collaborator seams

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod collaborators;
pub mod draft;
pub mod optimistic;
pub mod storage;
