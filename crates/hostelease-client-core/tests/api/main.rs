mod bootstrap;
mod helpers;
mod login;
mod register;
