// Core game logic: slots, state, physics
pub mod core;

// Environment configuration
pub mod config;

// Hub, transport and tick loop
pub mod services;

// Wire messages (requests/responses)
pub mod models;

// HTTP and WebSocket routes
pub mod routes;

// Application state
pub mod state;
