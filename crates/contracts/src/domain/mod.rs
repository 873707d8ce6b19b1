pub mod a001_department;
pub mod a002_employee;
pub mod a003_leave_type;
pub mod a004_payroll_run;
pub mod a005_supplier;
pub mod a006_role;
pub mod common;
