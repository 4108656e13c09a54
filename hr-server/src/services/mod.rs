//! Domain logic shared by the HTTP handlers

pub mod employee_code;
pub mod salary_visibility;
