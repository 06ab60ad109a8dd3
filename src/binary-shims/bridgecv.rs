fn main() { bridgecv_tasks::entry_points::bridgecv() }
