mod actions;
mod component;
mod forms;
mod handle;
mod loaders;
mod modals;
mod panels;
mod storage;

pub use component::App;
