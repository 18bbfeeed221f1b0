// Application configuration
pub mod config;

// Route paths and URL generation
pub mod routes;

// Pagination service
pub mod pagination;

// Flash messages carried across redirects
pub mod flash;

// Config forms and action buttons
pub mod form;

// Page rendering
pub mod view;

// HTTP controllers
pub mod api;
