use im::Vector;

pub trait Appended<T> {
    fn appended(&self, item: T) -> Vector<T>;
}

impl<T: Clone> Appended<T> for Vector<T> {
    fn appended(&self, item: T) -> Vector<T> {
        let mut result = self.clone();
        result.push_back(item);
        result
    }
}
