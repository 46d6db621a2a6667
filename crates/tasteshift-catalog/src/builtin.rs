//! Built-in cuisine content shipped with the extension bundle.

use tasteshift_types::{SectionId, ThemeId};

pub(crate) struct ThemeData {
    pub theme: ThemeId,
    pub hero_title: &'static str,
    pub hero_description: &'static str,
    pub protein: &'static [(&'static str, &'static str)],
    pub rice: &'static [(&'static str, &'static str)],
    pub beans: &'static [(&'static str, &'static str)],
    pub toppings: &'static [(&'static str, &'static str)],
}

impl ThemeData {
    pub fn items(&self, section: SectionId) -> &'static [(&'static str, &'static str)] {
        match section {
            SectionId::Protein => self.protein,
            SectionId::Rice => self.rice,
            SectionId::Beans => self.beans,
            SectionId::Toppings => self.toppings,
        }
    }
}

pub(crate) const THEMES: &[ThemeData] = &[
    ThemeData {
        theme: ThemeId::Italian,
        hero_title: "Your Italian Piatto",
        hero_description: "Build your ideal Italian bowl with your choice of Pollo Arrosto, \
            Stracotto di Manzo, Salsiccia e Peperoni, Gamberetti Aglio e Olio, or Melanzane e \
            Funghi. Served with creamy Risotto or Polenta, alongside Fagioli Cannellini or \
            Borlotti Beans. Finish it your way with fresh Bruschetta Topping, authentic \
            Parmigiano Reggiano, vibrant Peperonata, or rich Pesto alla Genovese.",
        protein: &[
            ("italian/protein-vegetable/braised-beef-stracotto.png", "Beef Stracotto"),
            ("italian/protein-vegetable/eggplant-mushroom.png", "Eggplant Mushroom"),
            ("italian/protein-vegetable/garlic-shrimp.png", "Garlic Shrimp"),
            ("italian/protein-vegetable/herbed-chicken.png", "Herbed Chicken"),
            ("italian/protein-vegetable/sausage-peppers.png", "Sausage Peppers"),
        ],
        rice: &[
            ("italian/rice/polenta.png", "Polenta"),
            ("italian/rice/risotto.png", "Risotto"),
        ],
        beans: &[
            ("italian/beans/borlotti-beans.png", "Borlotti Beans"),
            ("italian/beans/cannellini-beans.png", "Cannellini Beans"),
        ],
        toppings: &[
            ("italian/toppings/basil-pesto.png", "Basil Pesto"),
            ("italian/toppings/bruschetta-topping.png", "Bruschetta Topping"),
            ("italian/toppings/grated-parmesan.png", "Grated Parmesan"),
            ("italian/toppings/peperonata.png", "Peperonata"),
        ],
    },
    ThemeData {
        theme: ThemeId::Chinese,
        hero_title: "Craft Your Wok",
        hero_description: "Your personalized Chinese bowl, crafted with fresh ingredients. \
            Choose from savory General Tso's, Kung Pao Chicken, Sweet and Sour Pork, Mapo Tofu, \
            or Beef and Broccoli. Pair with Steamed White or Fried Rice, then finish with \
            Edamame or Black Bean Sauce, Soy Sauce, Chili Oil, Hoisin, or Duck Sauce. Fresh, \
            flavorful, and all yours.",
        protein: &[
            ("chinese/protein-vegetable/general-tso-chicken.png", "General Tso's Chicken"),
            ("chinese/protein-vegetable/kung-pao-chicken.png", "Kung Pao Chicken"),
            ("chinese/protein-vegetable/sweet-sour-pork.png", "Sweet and Sour Pork"),
            ("chinese/protein-vegetable/mapo-tofu.png", "Mapo Tofu"),
            ("chinese/protein-vegetable/beef-broccoli.png", "Beef and Broccoli"),
        ],
        rice: &[
            ("chinese/rice/steamed-rice.png", "Steamed Rice"),
            ("chinese/rice/fried-rice.png", "Fried Rice"),
        ],
        beans: &[
            ("chinese/beans/edamame.png", "Edamame"),
            ("chinese/beans/black-bean-sauce.png", "Black Bean Sauce"),
        ],
        toppings: &[
            ("chinese/toppings/soy-sauce.png", "Soy Sauce"),
            ("chinese/toppings/chili-oil.png", "Chili Oil"),
            ("chinese/toppings/hoisin-sauce.png", "Hoisin Sauce"),
            ("chinese/toppings/duck-sauce.png", "Duck Sauce"),
        ],
    },
    ThemeData {
        theme: ThemeId::Bronx,
        hero_title: "Boogie Down Bowl",
        hero_description: "Craft your perfect Bronx Plate. Choose from savory Fried Chicken, \
            tender BBQ Ribs, Collard Greens with Smoked Turkey, creamy Mac and Cheese, or crispy \
            Fried Catfish. Add your choice of Dirty Rice or Jambalaya Rice, plus Black-Eyed Peas \
            or Red Beans. Top it all with Hot Sauce, BBQ Sauce, Honey Mustard, or Ranch for a \
            taste that's all your own.",
        protein: &[
            ("bronx/protein-vegetable/fried-chicken.png", "Fried Chicken"),
            ("bronx/protein-vegetable/bbq-ribs.png", "BBQ Ribs"),
            ("bronx/protein-vegetable/collard-greens-turkey.png", "Collard Greens with Turkey"),
            ("bronx/protein-vegetable/mac-cheese.png", "Mac and Cheese"),
            ("bronx/protein-vegetable/fried-catfish.png", "Fried Catfish"),
        ],
        rice: &[
            ("bronx/rice/dirty-rice.png", "Dirty Rice"),
            ("bronx/rice/jambalaya-rice.png", "Jambalaya Rice"),
        ],
        beans: &[
            ("bronx/beans/black-eyed-peas.png", "Black-Eyed Peas"),
            ("bronx/beans/red-beans.png", "Red Beans"),
        ],
        toppings: &[
            ("bronx/toppings/hot-sauce.png", "Hot Sauce"),
            ("bronx/toppings/bbq-sauce.png", "BBQ Sauce"),
            ("bronx/toppings/honey-mustard.png", "Honey Mustard"),
            ("bronx/toppings/ranch-dressing.png", "Ranch Dressing"),
        ],
    },
    ThemeData {
        theme: ThemeId::Brooklyn,
        hero_title: "Brooklyn Street Eats",
        hero_description: "Build your Brooklyn bowl with your choice of freshly prepared Soul \
            Food Fried Chicken, Smothered Pork Chops, Oxtails, or Fried Whiting. Pair it with \
            Yellow Rice or classic Rice and Gravy, plus Black Beans and Rice or Red Beans. Add \
            sweet Candied Yams for a perfect touch. Finish your custom creation with Hot Sauce, \
            BBQ, Tartar, or Honey Hot.",
        protein: &[
            ("brooklyn/protein-vegetable/soul-fried-chicken.png", "Soul Food Fried Chicken"),
            ("brooklyn/protein-vegetable/smothered-pork-chops.png", "Smothered Pork Chops"),
            ("brooklyn/protein-vegetable/oxtails.png", "Oxtails"),
            ("brooklyn/protein-vegetable/candied-yams.png", "Candied Yams"),
            ("brooklyn/protein-vegetable/fried-whiting.png", "Fried Whiting"),
        ],
        rice: &[
            ("brooklyn/rice/yellow-rice.png", "Yellow Rice"),
            ("brooklyn/rice/rice-gravy.png", "Rice and Gravy"),
        ],
        beans: &[
            ("brooklyn/beans/black-beans-rice.png", "Black Beans and Rice"),
            ("brooklyn/beans/red-beans.png", "Red Beans"),
        ],
        toppings: &[
            ("brooklyn/toppings/hot-sauce.png", "Hot Sauce"),
            ("brooklyn/toppings/bbq-sauce.png", "BBQ Sauce"),
            ("brooklyn/toppings/tartar-sauce.png", "Tartar Sauce"),
            ("brooklyn/toppings/honey-hot-sauce.png", "Honey Hot Sauce"),
        ],
    },
    ThemeData {
        theme: ThemeId::English,
        hero_title: "Craft English Fare",
        hero_description: "Your choice of classic English mains: Fish and Chips, Bangers and \
            Mash, Roast Beef, Shepherd's Pie, or Chicken Tikka Masala. Served in a delicious \
            bowl with your pick of Mashed or Roasted Potatoes, plus Baked Beans or Mushy Peas. \
            Top it off with HP Sauce, Malt Vinegar, Brown Gravy, or Mint Sauce for your perfect \
            custom creation.",
        protein: &[
            ("english/protein-vegetable/fish-chips.png", "Fish and Chips"),
            ("english/protein-vegetable/bangers-mash.png", "Bangers and Mash"),
            ("english/protein-vegetable/roast-beef.png", "Roast Beef"),
            ("english/protein-vegetable/shepherds-pie.png", "Shepherd's Pie"),
            ("english/protein-vegetable/chicken-tikka-masala.png", "Chicken Tikka Masala"),
        ],
        rice: &[
            ("english/rice/mashed-potatoes.png", "Mashed Potatoes"),
            ("english/rice/roasted-potatoes.png", "Roasted Potatoes"),
        ],
        beans: &[
            ("english/beans/baked-beans.png", "Baked Beans"),
            ("english/beans/mushy-peas.png", "Mushy Peas"),
        ],
        toppings: &[
            ("english/toppings/brown-gravy.png", "Brown Gravy"),
            ("english/toppings/hp-sauce.png", "HP Sauce"),
            ("english/toppings/malt-vinegar.png", "Malt Vinegar"),
            ("english/toppings/mint-sauce.png", "Mint Sauce"),
        ],
    },
    ThemeData {
        theme: ThemeId::Jamaican,
        hero_title: "Your Yaad Plate",
        hero_description: "Your choice of savory Jerk Chicken, tender Curry Goat, Brown Stew, \
            Oxtail, or Ackee and Saltfish, served in a vibrant bowl with Jasmine (Rice and Peas) \
            or Coconut Rice and Red Kidney or Black Beans. Top it with fiery Scotch Bonnet \
            sauce, sweet Fried Plantains, crisp Pickled Cabbage, or our signature Jerk sauce. \
            Experience bold, fresh Jamaican flavors, custom-built just for you.",
        protein: &[
            ("jamaican/protein-vegetable/jerk-chicken.png", "Jerk Chicken"),
            ("jamaican/protein-vegetable/curry-goat.png", "Curry Goat"),
            ("jamaican/protein-vegetable/brown-stew-chicken.png", "Brown Stew Chicken"),
            ("jamaican/protein-vegetable/oxtail.png", "Oxtail"),
            ("jamaican/protein-vegetable/ackee-saltfish.png", "Ackee and Saltfish"),
        ],
        rice: &[
            ("jamaican/rice/jasmine-rice.png", "Jasmine Rice"),
            ("jamaican/rice/coconut-rice.png", "Coconut Rice"),
        ],
        beans: &[
            ("jamaican/beans/black-beans.png", "Black Beans"),
            ("jamaican/beans/red-kidney-beans.png", "Red Kidney Beans"),
        ],
        toppings: &[
            ("jamaican/toppings/fried-plantains.png", "Fried Plantains"),
            ("jamaican/toppings/jerk-sauce.png", "Jerk Sauce"),
            ("jamaican/toppings/pickled-cabbage.png", "Pickled Cabbage"),
            ("jamaican/toppings/scotch-bonnet-sauce.png", "Scotch Bonnet Sauce"),
        ],
    },
];

/// Default prompt texts.
pub(crate) const PROMPTS: &[(&str, &str)] = &[
    ("protein", "Choose your protein."),
    ("rice", "What rice would you like?"),
    ("beans", "What beans would you like?"),
    ("toppings", "What toppings would you like?"),
    ("fallback", "You skipped your protein!"),
];
